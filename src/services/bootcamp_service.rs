//! Bootcamp service: listing, CRUD, radius search and photo upload.

use std::collections::HashMap;
use std::sync::Arc;

use actix_multipart::Multipart;
use log::{debug, info, warn};
use mongodb::bson::{self, oid::ObjectId, Document};

use crate::constants::{
    CODE_BOOTCAMP_LIMIT_REACHED, CODE_BOOTCAMP_NOT_FOUND, CODE_INTERNAL_ERROR, CODE_INVALID_TOKEN,
    ERR_BOOTCAMP_NOT_FOUND, ERR_FAILED_FETCH_BOOTCAMP, ERR_INVALID_TOKEN,
};
use crate::errors::ApiError;
use crate::middleware::{require_owner, require_role, PUBLISHING_ROLES};
use crate::models::{
    Bootcamp, Claims, CreateBootcampRequest, Location, Role, UpdateBootcampRequest, DEFAULT_PHOTO,
};
use crate::query::{parse_distance, within_radius, ListQuery, Pagination};
use crate::repositories::{BootcampRepository, PageSource};
use crate::services::{FileService, Geocoder};
use crate::utils::{document_to_json, slugify};

pub struct BootcampService {
    repository: Arc<BootcampRepository>,
    geocoder: Arc<Geocoder>,
    files: FileService,
}

impl BootcampService {
    pub fn new(repository: Arc<BootcampRepository>, geocoder: Arc<Geocoder>, files: FileService) -> Self {
        Self {
            repository,
            geocoder,
            files,
        }
    }

    /// Run the list-query pipeline over decoded query parameters.
    pub async fn list(
        &self,
        params: &HashMap<String, String>,
    ) -> Result<(Vec<serde_json::Value>, Pagination), ApiError> {
        list_page(self.repository.as_ref(), params).await
    }

    /// Fetch one bootcamp; a malformed id is reported the same as a missing one.
    pub async fn get(&self, id: &str) -> Result<Bootcamp, ApiError> {
        let object_id = parse_bootcamp_id(id)?;
        self.repository
            .find_by_id(object_id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, claims: &Claims, req: CreateBootcampRequest) -> Result<Bootcamp, ApiError> {
        require_role(claims, &PUBLISHING_ROLES)?;
        let user = caller_id(claims)?;

        if claims.role != Role::Admin && self.repository.count_by_user(user).await? > 0 {
            warn!("User {} tried to publish a second bootcamp", user);
            return Err(ApiError::bad_request(
                CODE_BOOTCAMP_LIMIT_REACHED,
                format!("The user with ID {} has already published a bootcamp", user),
            ));
        }

        let location = self.geocoder.geocode(&req.address).await?.to_location();

        let name = req.name.trim().to_string();
        let bootcamp = Bootcamp {
            id: None,
            slug: slugify(&name),
            name,
            description: req.description,
            website: req.website,
            phone: req.phone,
            email: req.email,
            address: req.address,
            location: Some(location),
            careers: req.careers,
            average_rating: req.average_rating,
            average_cost: req.average_cost,
            photo: DEFAULT_PHOTO.to_string(),
            housing: req.housing.unwrap_or(false),
            job_assistance: req.job_assistance.unwrap_or(false),
            job_guarantee: req.job_guarantee.unwrap_or(false),
            accept_gi: req.accept_gi.unwrap_or(false),
            created_at: bson::DateTime::now(),
            user,
        };

        let id = self.repository.insert(&bootcamp).await?;
        info!("Bootcamp {} created by user {}", id, user);

        Ok(Bootcamp {
            id: Some(id),
            ..bootcamp
        })
    }

    pub async fn update(
        &self,
        id: &str,
        claims: &Claims,
        req: UpdateBootcampRequest,
    ) -> Result<Bootcamp, ApiError> {
        require_role(claims, &PUBLISHING_ROLES)?;
        let existing = self.get(id).await?;
        require_owner(claims, &existing.user)?;
        let object_id = existing.id.ok_or_else(|| not_found(id))?;

        let location = match req.address.as_deref() {
            Some(address) if address != existing.address => {
                Some(self.geocoder.geocode(address).await?.to_location())
            }
            _ => None,
        };

        let update = build_update(req, location)?;
        if update.is_empty() {
            return Ok(existing);
        }

        let updated = self.repository.update(object_id, update).await?.ok_or_else(|| {
            ApiError::internal(CODE_INTERNAL_ERROR, ERR_FAILED_FETCH_BOOTCAMP)
        })?;
        info!("Bootcamp {} updated by user {}", object_id, claims.sub);
        Ok(updated)
    }

    /// Delete a bootcamp and its courses.
    pub async fn delete(&self, id: &str, claims: &Claims) -> Result<(), ApiError> {
        require_role(claims, &PUBLISHING_ROLES)?;
        let existing = self.get(id).await?;
        require_owner(claims, &existing.user)?;
        let object_id = existing.id.ok_or_else(|| not_found(id))?;

        if self.repository.delete(object_id).await? == 0 {
            return Err(not_found(id));
        }
        info!("Bootcamp {} deleted by user {}", object_id, claims.sub);
        Ok(())
    }

    /// Bootcamps within `distance` kilometers of the zipcode's location.
    pub async fn within_radius(&self, zipcode: &str, distance: &str) -> Result<Vec<Bootcamp>, ApiError> {
        let distance_km = parse_distance(distance)?;
        let center = self.geocoder.geocode(zipcode).await?.point;
        debug!(
            "Radius search around {} ({}, {}) for {} km",
            zipcode, center.latitude, center.longitude, distance_km
        );
        self.repository
            .find_all(within_radius(center, distance_km))
            .await
    }

    /// Store an uploaded photo for a bootcamp and return its file name.
    pub async fn upload_photo(
        &self,
        id: &str,
        claims: &Claims,
        payload: &mut Multipart,
    ) -> Result<String, ApiError> {
        require_role(claims, &PUBLISHING_ROLES)?;
        let existing = self.get(id).await?;
        require_owner(claims, &existing.user)?;
        let object_id = existing.id.ok_or_else(|| not_found(id))?;

        let file_name = self.files.save_photo(&object_id, payload).await?;
        self.repository.update_photo(object_id, &file_name).await?;
        Ok(file_name)
    }
}

/// Count, plan and fetch one page of bootcamps.
///
/// The total is counted before the page is fetched, so the pagination links
/// and the page contents come from two separate reads. A page that starts past
/// the last match is answered without a second read.
pub async fn list_page<S>(
    source: &S,
    params: &HashMap<String, String>,
) -> Result<(Vec<serde_json::Value>, Pagination), ApiError>
where
    S: PageSource + ?Sized,
{
    let query = ListQuery::from_params(params);
    let filter = query.filter_document();
    let total = source.count(filter.clone()).await?;
    let pagination = query.pagination(total);

    if query.is_past_end(total) {
        debug!(
            "Page {} (limit {}) is past the {} matching bootcamps",
            query.page, query.limit, total
        );
        return Ok((Vec::new(), pagination));
    }

    let documents = source
        .find_page(
            filter,
            query.projection.clone(),
            query.sort.clone(),
            query.skip(),
            query.limit,
        )
        .await?;

    debug!(
        "Listed {} of {} bootcamps (page {}, limit {})",
        documents.len(),
        total,
        query.page,
        query.limit
    );

    Ok((documents.into_iter().map(document_to_json).collect(), pagination))
}

fn not_found(id: &str) -> ApiError {
    ApiError::not_found(
        CODE_BOOTCAMP_NOT_FOUND,
        format!("{} {}", ERR_BOOTCAMP_NOT_FOUND, id),
    )
}

fn parse_bootcamp_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| not_found(id))
}

fn caller_id(claims: &Claims) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized(CODE_INVALID_TOKEN, ERR_INVALID_TOKEN))
}

/// `$set` document for the fields present in an update request.
///
/// A new name also rewrites the slug; a new location is set when the address
/// was re-geocoded.
fn build_update(req: UpdateBootcampRequest, location: Option<Location>) -> Result<Document, ApiError> {
    let mut update = Document::new();

    if let Some(name) = req.name {
        let name = name.trim();
        update.insert("slug", slugify(name));
        update.insert("name", name);
    }
    if let Some(description) = req.description {
        update.insert("description", description);
    }
    if let Some(website) = req.website {
        update.insert("website", website);
    }
    if let Some(phone) = req.phone {
        update.insert("phone", phone);
    }
    if let Some(email) = req.email {
        update.insert("email", email);
    }
    if let Some(address) = req.address {
        update.insert("address", address);
    }
    if let Some(location) = location {
        update.insert("location", bson::to_bson(&location)?);
    }
    if let Some(careers) = req.careers {
        update.insert("careers", bson::to_bson(&careers)?);
    }
    if let Some(rating) = req.average_rating {
        update.insert("averageRating", rating);
    }
    if let Some(cost) = req.average_cost {
        update.insert("averageCost", cost);
    }
    if let Some(housing) = req.housing {
        update.insert("housing", housing);
    }
    if let Some(job_assistance) = req.job_assistance {
        update.insert("jobAssistance", job_assistance);
    }
    if let Some(job_guarantee) = req.job_guarantee {
        update.insert("jobGuarantee", job_guarantee);
    }
    if let Some(accept_gi) = req.accept_gi {
        update.insert("acceptGi", accept_gi);
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Career, PaginatedResponse};
    use crate::query::PageRef;
    use async_trait::async_trait;
    use mongodb::bson::{doc, Bson};
    use serde_json::json;
    use std::sync::Mutex;

    /// In-memory page source that records every read.
    struct RecordingSource {
        total: u64,
        counted: Mutex<Vec<Document>>,
        fetched: Mutex<Vec<(Document, u64, u64)>>,
    }

    impl RecordingSource {
        fn with_total(total: u64) -> Self {
            Self {
                total,
                counted: Mutex::new(Vec::new()),
                fetched: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageSource for RecordingSource {
        async fn count(&self, filter: Document) -> Result<u64, ApiError> {
            self.counted.lock().unwrap().push(filter);
            Ok(self.total)
        }

        async fn find_page(
            &self,
            filter: Document,
            _projection: Option<Document>,
            _sort: Document,
            skip: u64,
            limit: u64,
        ) -> Result<Vec<Document>, ApiError> {
            self.fetched.lock().unwrap().push((filter, skip, limit));
            let remaining = self.total.saturating_sub(skip).min(limit);
            Ok((0..remaining)
                .map(|n| doc! { "name": format!("Bootcamp {}", skip + n) })
                .collect())
        }
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[actix_web::test]
    async fn test_list_counts_and_fetches_with_the_same_filter() {
        let source = RecordingSource::with_total(25);
        let raw = params(&[("page", "2"), ("limit", "10"), ("averageCost[lte]", "10000")]);

        let (data, pagination) = list_page(&source, &raw).await.unwrap();

        let expected_filter = doc! { "averageCost": { "$lte": 10000_i64 } };
        assert_eq!(*source.counted.lock().unwrap(), vec![expected_filter.clone()]);
        assert_eq!(
            *source.fetched.lock().unwrap(),
            vec![(expected_filter, 10, 10)]
        );

        let body = serde_json::to_value(PaginatedResponse::new(data, pagination)).unwrap();
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["count"], json!(10));
        assert_eq!(
            body["pagination"],
            json!({ "next": { "page": 3, "limit": 10 }, "prev": { "page": 1, "limit": 10 } })
        );
        assert_eq!(body["data"][0], json!({ "name": "Bootcamp 10" }));
    }

    #[actix_web::test]
    async fn test_list_defaults_on_small_collection() {
        let source = RecordingSource::with_total(5);

        let (data, pagination) = list_page(&source, &params(&[])).await.unwrap();

        assert_eq!(data.len(), 5);
        assert_eq!(pagination, Pagination::default());
        assert_eq!(*source.counted.lock().unwrap(), vec![Document::new()]);
        assert_eq!(
            *source.fetched.lock().unwrap(),
            vec![(Document::new(), 0, 25)]
        );
    }

    #[actix_web::test]
    async fn test_page_past_the_end_skips_the_fetch() {
        let source = RecordingSource::with_total(10);
        let raw = params(&[("page", "1000000000000000000"), ("limit", "25")]);

        let (data, pagination) = list_page(&source, &raw).await.unwrap();

        assert!(data.is_empty());
        assert!(source.fetched.lock().unwrap().is_empty());
        assert_eq!(pagination.next, None);
        assert_eq!(
            pagination.prev,
            Some(PageRef {
                page: 999_999_999_999_999_999,
                limit: 25
            })
        );
    }

    #[test]
    fn test_empty_update_sets_nothing() {
        let update = build_update(UpdateBootcampRequest::default(), None).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_renaming_rewrites_slug() {
        let update = build_update(
            UpdateBootcampRequest {
                name: Some(" Codemasters Online ".to_string()),
                housing: Some(true),
                ..Default::default()
            },
            None,
        )
        .unwrap();

        assert_eq!(
            update,
            doc! {
                "slug": "codemasters-online",
                "name": "Codemasters Online",
                "housing": true,
            }
        );
    }

    #[test]
    fn test_update_uses_stored_field_names() {
        let update = build_update(
            UpdateBootcampRequest {
                careers: Some(vec![Career::DataScience, Career::Business]),
                average_cost: Some(12000.0),
                accept_gi: Some(false),
                ..Default::default()
            },
            None,
        )
        .unwrap();

        assert_eq!(
            update.get("careers"),
            Some(&Bson::Array(vec![
                Bson::String("Data Science".to_string()),
                Bson::String("Business".to_string()),
            ]))
        );
        assert_eq!(update.get_f64("averageCost").unwrap(), 12000.0);
        assert!(!update.get_bool("acceptGi").unwrap());
    }

    #[test]
    fn test_geocoded_location_is_stored() {
        let location = Location {
            kind: "Point".to_string(),
            coordinates: vec![-71.1, 42.3],
            formatted_address: Some("Boston, MA".to_string()),
            street: None,
            city: Some("Boston".to_string()),
            state: Some("MA".to_string()),
            zipcode: None,
            country: None,
        };
        let update = build_update(
            UpdateBootcampRequest {
                address: Some("Boston, MA".to_string()),
                ..Default::default()
            },
            Some(location),
        )
        .unwrap();

        let stored = update.get_document("location").unwrap();
        assert_eq!(stored.get_str("type").unwrap(), "Point");
        assert_eq!(stored.get_str("city").unwrap(), "Boston");
        assert!(!stored.contains_key("street"));
        assert_eq!(update.get_str("address").unwrap(), "Boston, MA");
    }

    #[test]
    fn test_bad_ids_are_not_found() {
        let err = parse_bootcamp_id("not-an-id").unwrap_err();
        assert_eq!(err.code(), CODE_BOOTCAMP_NOT_FOUND);
        assert_eq!(
            err.to_string(),
            "Not Found [BOOTCAMP_NOT_FOUND]: Bootcamp not found with id of not-an-id"
        );
    }

    #[test]
    fn test_caller_id_requires_object_id_subject() {
        let claims = Claims {
            sub: "nobody".to_string(),
            role: Role::Publisher,
            exp: 0,
            iat: 0,
        };
        assert_eq!(caller_id(&claims).unwrap_err().code(), CODE_INVALID_TOKEN);
    }
}
