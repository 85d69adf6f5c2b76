//! Bootcamp response models.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Bootcamp, Career, Location};

/// Bootcamp data returned in API responses
#[derive(Debug, Serialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BootcampResponse {
    #[schema(example = "5d713995b721c3bb38c1f5d0")]
    pub id: String,
    #[schema(example = "Devworks Bootcamp")]
    pub name: String,
    #[schema(example = "devworks-bootcamp")]
    pub slug: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    pub careers: Vec<Career>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cost: Option<f64>,
    pub photo: String,
    pub housing: bool,
    pub job_assistance: bool,
    pub job_guarantee: bool,
    pub accept_gi: bool,
    pub created_at: DateTime<Utc>,
    /// Owner user id
    pub user: String,
}

impl From<Bootcamp> for BootcampResponse {
    fn from(bootcamp: Bootcamp) -> Self {
        Self {
            id: bootcamp.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: bootcamp.name,
            slug: bootcamp.slug,
            description: bootcamp.description,
            website: bootcamp.website,
            phone: bootcamp.phone,
            email: bootcamp.email,
            address: bootcamp.address,
            location: bootcamp.location,
            careers: bootcamp.careers,
            average_rating: bootcamp.average_rating,
            average_cost: bootcamp.average_cost,
            photo: bootcamp.photo,
            housing: bootcamp.housing,
            job_assistance: bootcamp.job_assistance,
            job_guarantee: bootcamp.job_guarantee,
            accept_gi: bootcamp.accept_gi,
            created_at: bootcamp.created_at.to_chrono(),
            user: bootcamp.user.to_hex(),
        }
    }
}
