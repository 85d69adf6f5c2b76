use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Default photo for bootcamps that never had one uploaded.
pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

/// Career tracks a bootcamp can offer.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    Business,
    Other,
}

impl fmt::Display for Career {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Career::WebDevelopment => "Web Development",
            Career::MobileDevelopment => "Mobile Development",
            Career::UiUx => "UI/UX",
            Career::DataScience => "Data Science",
            Career::Business => "Business",
            Career::Other => "Other",
        };
        f.write_str(label)
    }
}

/// GeoJSON point plus the address parts returned by the geocoder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Always "Point"
    #[serde(rename = "type")]
    #[schema(example = "Point")]
    pub kind: String,
    /// Longitude, latitude
    #[schema(example = json!([-71.104028, 42.350846]))]
    pub coordinates: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Bootcamp document stored in MongoDB
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub careers: Vec<Career>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<f64>,
    #[serde(default = "default_photo")]
    pub photo: String,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    pub created_at: mongodb::bson::DateTime,
    pub user: ObjectId,
}

fn default_photo() -> String {
    DEFAULT_PHOTO.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_career_labels_match_stored_values() {
        let stored = bson::to_bson(&Career::UiUx).unwrap();
        assert_eq!(stored, bson::Bson::String("UI/UX".to_string()));
        assert_eq!(Career::DataScience.to_string(), "Data Science");
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let user = ObjectId::new();
        let document = doc! {
            "_id": ObjectId::new(),
            "name": "Devworks Bootcamp",
            "slug": "devworks-bootcamp",
            "description": "Full stack web development",
            "address": "233 Bay State Rd Boston MA 02215",
            "careers": ["Web Development", "UI/UX"],
            "createdAt": bson::DateTime::now(),
            "user": user,
        };

        let bootcamp: Bootcamp = bson::from_document(document).unwrap();
        assert_eq!(bootcamp.photo, DEFAULT_PHOTO);
        assert!(!bootcamp.housing);
        assert!(bootcamp.location.is_none());
        assert_eq!(bootcamp.careers, vec![Career::WebDevelopment, Career::UiUx]);
        assert_eq!(bootcamp.user, user);
    }

    #[test]
    fn test_serialize_uses_camel_case_fields() {
        let bootcamp = Bootcamp {
            id: None,
            name: "ModernTech".to_string(),
            slug: "moderntech".to_string(),
            description: "Mobile".to_string(),
            website: None,
            phone: None,
            email: None,
            address: "Boston".to_string(),
            location: None,
            careers: vec![Career::MobileDevelopment],
            average_rating: None,
            average_cost: Some(10000.0),
            photo: default_photo(),
            housing: false,
            job_assistance: true,
            job_guarantee: false,
            accept_gi: true,
            created_at: bson::DateTime::now(),
            user: ObjectId::new(),
        };

        let document = bson::to_document(&bootcamp).unwrap();
        assert!(document.contains_key("averageCost"));
        assert!(document.contains_key("jobAssistance"));
        assert!(document.contains_key("acceptGi"));
        assert!(document.contains_key("createdAt"));
        assert!(!document.contains_key("_id"));
    }
}
