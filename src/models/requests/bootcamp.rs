//! Bootcamp request models.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::Career;
use crate::validators::validate_not_blank;

/// Request payload for creating a bootcamp
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBootcampRequest {
    /// Unique bootcamp name (max 50 characters)
    #[validate(
        length(max = 50, message = "Name can not be more than 50 characters"),
        custom(function = "validate_not_blank", message = "Please add a name")
    )]
    #[schema(example = "Devworks Bootcamp")]
    pub name: String,
    /// Description (max 500 characters)
    #[validate(
        length(max = 500, message = "Description can not be more than 500 characters"),
        custom(function = "validate_not_blank", message = "Please add a description")
    )]
    #[schema(example = "Devworks is a full stack JavaScript Bootcamp")]
    pub description: String,
    /// Website URL
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    #[schema(example = "https://devworks.com")]
    pub website: Option<String>,
    /// Phone number (max 20 characters)
    #[validate(length(max = 20, message = "Phone number can not be longer than 20 characters"))]
    #[schema(example = "(111) 111-1111")]
    pub phone: Option<String>,
    /// Contact email
    #[validate(email(message = "Please add a valid email"))]
    #[schema(example = "enroll@devworks.com")]
    pub email: Option<String>,
    /// Street address, geocoded into a location
    #[validate(custom(function = "validate_not_blank", message = "Please add an address"))]
    #[schema(example = "233 Bay State Rd Boston MA 02215")]
    pub address: String,
    /// Offered career tracks (at least one)
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Vec<Career>,
    /// Average rating between 1 and 10
    #[validate(range(min = 1.0, max = 10.0, message = "Rating must be between 1 and 10"))]
    pub average_rating: Option<f64>,
    /// Average cost of tuition
    #[validate(range(min = 0.0, message = "Cost can not be negative"))]
    pub average_cost: Option<f64>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

/// Request payload for updating a bootcamp; absent fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBootcampRequest {
    #[validate(
        length(max = 50, message = "Name can not be more than 50 characters"),
        custom(function = "validate_not_blank", message = "Please add a name")
    )]
    pub name: Option<String>,
    #[validate(
        length(max = 500, message = "Description can not be more than 500 characters"),
        custom(function = "validate_not_blank", message = "Please add a description")
    )]
    pub description: Option<String>,
    #[validate(url(message = "Please use a valid URL with HTTP or HTTPS"))]
    pub website: Option<String>,
    #[validate(length(max = 20, message = "Phone number can not be longer than 20 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "Please add a valid email"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_not_blank", message = "Please add an address"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "Please add at least one career"))]
    pub careers: Option<Vec<Career>>,
    #[validate(range(min = 1.0, max = 10.0, message = "Rating must be between 1 and 10"))]
    pub average_rating: Option<f64>,
    #[validate(range(min = 0.0, message = "Cost can not be negative"))]
    pub average_cost: Option<f64>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}
