//! # Document Store
//!
//! In-process JSON document store backing the API, one collection per
//! resource. Records live as `serde_json::Value` under an `RwLock`;
//! validation runs here on every insert and update, and deleting a bootcamp
//! triggers a pre-delete cascade that removes its courses. When opened with
//! a data file the store loads the snapshot at startup and rewrites it after
//! every mutation.

use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::geo::{central_angle, GeoPoint};
use crate::model::{self, Location};
use crate::query::{FilterSet, ListQuery, PageBounds, SortKey};

/// On-disk snapshot shape
#[derive(Debug, Default, Serialize, Deserialize)]
struct Collections {
    bootcamps: Vec<Value>,
    courses: Vec<Value>,
}

/// The document store
pub struct Store {
    collections: RwLock<Collections>,
    data_file: Option<PathBuf>,
}

impl Store {
    /// Open a purely in-memory store
    pub fn in_memory() -> Self {
        Self {
            collections: RwLock::new(Collections::default()),
            data_file: None,
        }
    }

    /// Open a store backed by a snapshot file, loading it when present
    pub fn open(data_file: Option<PathBuf>) -> ApiResult<Self> {
        let collections = match &data_file {
            Some(path) if path.exists() => {
                let bytes = std::fs::read(path).map_err(|e| ApiError::Io(e.to_string()))?;
                serde_json::from_slice(&bytes)
                    .map_err(|e| ApiError::Internal(format!("corrupt snapshot: {}", e)))?
            }
            _ => Collections::default(),
        };

        Ok(Self {
            collections: RwLock::new(collections),
            data_file,
        })
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| ApiError::Internal("lock poisoned".to_string()))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| ApiError::Internal("lock poisoned".to_string()))
    }

    /// Rewrite the snapshot after a mutation
    fn persist(&self, collections: &Collections) -> ApiResult<()> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ApiError::Io(e.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(collections)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        std::fs::write(path, bytes).map_err(|e| ApiError::Io(e.to_string()))
    }

    // ==================
    // Bootcamps
    // ==================

    /// List bootcamps with the query applied. Returns the page and the
    /// filtered total. Records are populated with their course summaries
    /// unless a projection is requested.
    pub fn find_bootcamps(&self, query: &ListQuery) -> ApiResult<(Vec<Value>, usize)> {
        let collections = self.read()?;

        let mut records = filter_docs(&collections.bootcamps, query);
        sort_docs(&mut records, &query.sort);
        let total = records.len();
        let mut page = paginate(records, query);

        if query.select.is_some() {
            page = page.into_iter().map(|r| project(r, query)).collect();
        } else {
            for record in &mut page {
                populate_courses(record, &collections.courses);
            }
        }

        Ok((page, total))
    }

    /// Fetch one bootcamp by id; a malformed id reads as missing
    pub fn get_bootcamp(&self, id: &str) -> ApiResult<Value> {
        let collections = self.read()?;
        let mut record = find_doc(&collections.bootcamps, id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Bootcamp", id))?;
        populate_courses(&mut record, &collections.courses);
        Ok(record)
    }

    /// Insert a bootcamp. Validates, assigns id/createdAt when absent,
    /// and rejects a duplicate name.
    pub fn insert_bootcamp(&self, body: Value) -> ApiResult<Value> {
        let mut doc = as_object(body)?;
        assign_identity(&mut doc);
        doc.entry("photo")
            .or_insert_with(|| json!(model::bootcamp::default_photo()));

        let doc = Value::Object(doc);
        model::bootcamp::validate(&doc).map_err(ApiError::Validation)?;

        let mut collections = self.write()?;
        if name_taken(&collections.bootcamps, &doc, None) {
            return Err(ApiError::Duplicate("name"));
        }

        collections.bootcamps.push(doc.clone());
        self.persist(&collections)?;
        Ok(doc)
    }

    /// Merge-patch a bootcamp: apply only the provided fields, then
    /// re-validate the merged document
    pub fn update_bootcamp(&self, id: &str, patch: Value) -> ApiResult<Value> {
        let patch = as_object(patch)?;
        let mut collections = self.write()?;

        let index = position(&collections.bootcamps, id)
            .ok_or_else(|| ApiError::not_found("Bootcamp", id))?;

        let mut merged = collections.bootcamps[index].clone();
        merge_patch(&mut merged, patch);
        model::bootcamp::validate(&merged).map_err(ApiError::Validation)?;

        if name_taken(&collections.bootcamps, &merged, Some(index)) {
            return Err(ApiError::Duplicate("name"));
        }

        collections.bootcamps[index] = merged.clone();
        self.persist(&collections)?;
        Ok(merged)
    }

    /// Delete a bootcamp; its courses are cascade-removed first
    pub fn delete_bootcamp(&self, id: &str) -> ApiResult<()> {
        let mut collections = self.write()?;

        let index = position(&collections.bootcamps, id)
            .ok_or_else(|| ApiError::not_found("Bootcamp", id))?;

        cascade_delete_courses(&mut collections, id);
        collections.bootcamps.remove(index);
        self.persist(&collections)?;
        Ok(())
    }

    /// Point a bootcamp's photo field at an uploaded filename. Called only
    /// after the file write has succeeded.
    pub fn update_bootcamp_photo(&self, id: &str, filename: &str) -> ApiResult<Value> {
        let mut collections = self.write()?;

        let index = position(&collections.bootcamps, id)
            .ok_or_else(|| ApiError::not_found("Bootcamp", id))?;

        if let Some(obj) = collections.bootcamps[index].as_object_mut() {
            obj.insert("photo".to_string(), json!(filename));
        }
        let updated = collections.bootcamps[index].clone();
        self.persist(&collections)?;
        Ok(updated)
    }

    /// All bootcamps whose location lies within the spherical cap around
    /// `center`, unpaginated
    pub fn bootcamps_within(&self, center: &GeoPoint, angular_radius: f64) -> ApiResult<Vec<Value>> {
        let collections = self.read()?;

        let matches = collections
            .bootcamps
            .iter()
            .filter(|record| match doc_location(record) {
                Some(point) => central_angle(center, &point) <= angular_radius,
                None => false,
            })
            .cloned()
            .collect();

        Ok(matches)
    }

    // ==================
    // Courses
    // ==================

    /// List courses, optionally scoped to one bootcamp. Each record is
    /// populated with the owning bootcamp's summary unless a projection is
    /// requested.
    pub fn find_courses(
        &self,
        query: &ListQuery,
        bootcamp_id: Option<&str>,
    ) -> ApiResult<(Vec<Value>, usize)> {
        let collections = self.read()?;

        let scoped: Vec<Value> = match bootcamp_id {
            Some(id) => collections
                .courses
                .iter()
                .filter(|c| c.get("bootcamp").and_then(Value::as_str) == Some(id))
                .cloned()
                .collect(),
            None => collections.courses.clone(),
        };

        let mut records: Vec<Value> = {
            let filter_set = FilterSet {
                filters: query.filters.clone(),
            };
            scoped.into_iter().filter(|r| filter_set.matches(r)).collect()
        };
        sort_docs(&mut records, &query.sort);
        let total = records.len();
        let mut page = paginate(records, query);

        if query.select.is_some() {
            page = page.into_iter().map(|r| project(r, query)).collect();
        } else {
            for record in &mut page {
                populate_bootcamp(record, &collections.bootcamps);
            }
        }

        Ok((page, total))
    }

    /// Fetch one course by id, populated with its bootcamp summary
    pub fn get_course(&self, id: &str) -> ApiResult<Value> {
        let collections = self.read()?;
        let mut record = find_doc(&collections.courses, id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Course", id))?;
        populate_bootcamp(&mut record, &collections.bootcamps);
        Ok(record)
    }

    /// Insert a course under a bootcamp; 404 when the bootcamp is missing.
    /// The owner's averageCost is recomputed afterwards.
    pub fn insert_course(&self, bootcamp_id: &str, body: Value) -> ApiResult<Value> {
        let mut doc = as_object(body)?;
        assign_identity(&mut doc);
        doc.insert("bootcamp".to_string(), json!(bootcamp_id));

        let doc = Value::Object(doc);
        model::course::validate(&doc).map_err(ApiError::Validation)?;

        let mut collections = self.write()?;
        if position(&collections.bootcamps, bootcamp_id).is_none() {
            return Err(ApiError::not_found("Bootcamp", bootcamp_id));
        }

        collections.courses.push(doc.clone());
        recompute_average_cost(&mut collections, bootcamp_id);
        self.persist(&collections)?;
        Ok(doc)
    }

    /// Merge-patch a course and re-validate; averageCost of the affected
    /// bootcamp(s) is recomputed
    pub fn update_course(&self, id: &str, patch: Value) -> ApiResult<Value> {
        let patch = as_object(patch)?;
        let mut collections = self.write()?;

        let index =
            position(&collections.courses, id).ok_or_else(|| ApiError::not_found("Course", id))?;

        let previous_owner = collections.courses[index]
            .get("bootcamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let mut merged = collections.courses[index].clone();
        merge_patch(&mut merged, patch);
        model::course::validate(&merged).map_err(ApiError::Validation)?;

        let owner = merged
            .get("bootcamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if position(&collections.bootcamps, &owner).is_none() {
            return Err(ApiError::not_found("Bootcamp", owner));
        }

        collections.courses[index] = merged.clone();
        recompute_average_cost(&mut collections, &owner);
        if previous_owner != owner {
            recompute_average_cost(&mut collections, &previous_owner);
        }
        self.persist(&collections)?;
        Ok(merged)
    }

    /// Delete a course and recompute the owner's averageCost
    pub fn delete_course(&self, id: &str) -> ApiResult<()> {
        let mut collections = self.write()?;

        let index =
            position(&collections.courses, id).ok_or_else(|| ApiError::not_found("Course", id))?;

        let owner = collections.courses[index]
            .get("bootcamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        collections.courses.remove(index);
        recompute_average_cost(&mut collections, &owner);
        self.persist(&collections)?;
        Ok(())
    }

    // ==================
    // Seeding
    // ==================

    /// Bulk-import records through the normal validation paths. Provided
    /// ids are honored so seed courses can reference seed bootcamps.
    pub fn import(&self, bootcamps: Vec<Value>, courses: Vec<Value>) -> ApiResult<(usize, usize)> {
        let mut inserted_bootcamps = 0;
        for bootcamp in bootcamps {
            self.insert_bootcamp(bootcamp)?;
            inserted_bootcamps += 1;
        }

        let mut inserted_courses = 0;
        for course in courses {
            let owner = course
                .get("bootcamp")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            self.insert_course(&owner, course)?;
            inserted_courses += 1;
        }

        Ok((inserted_bootcamps, inserted_courses))
    }

    /// Remove every record
    pub fn clear(&self) -> ApiResult<()> {
        let mut collections = self.write()?;
        collections.bootcamps.clear();
        collections.courses.clear();
        self.persist(&collections)
    }

    /// (bootcamp count, course count)
    pub fn counts(&self) -> ApiResult<(usize, usize)> {
        let collections = self.read()?;
        Ok((collections.bootcamps.len(), collections.courses.len()))
    }
}

// ==================
// Document helpers
// ==================

fn as_object(body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("Request body must be a JSON object")),
    }
}

/// Assign id and createdAt unless the caller (the seeder) supplied a valid
/// id of its own
fn assign_identity(doc: &mut Map<String, Value>) {
    let has_valid_id = doc
        .get("id")
        .and_then(Value::as_str)
        .map(|id| Uuid::parse_str(id).is_ok())
        .unwrap_or(false);
    if !has_valid_id {
        doc.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    }
    if doc.get("createdAt").is_none() {
        doc.insert("createdAt".to_string(), json!(Utc::now().to_rfc3339()));
    }
}

fn find_doc<'a>(docs: &'a [Value], id: &str) -> Option<&'a Value> {
    // A malformed id can match nothing
    if Uuid::parse_str(id).is_err() {
        return None;
    }
    docs.iter()
        .find(|d| d.get("id").and_then(Value::as_str) == Some(id))
}

fn position(docs: &[Value], id: &str) -> Option<usize> {
    if Uuid::parse_str(id).is_err() {
        return None;
    }
    docs.iter()
        .position(|d| d.get("id").and_then(Value::as_str) == Some(id))
}

fn name_taken(docs: &[Value], doc: &Value, skip: Option<usize>) -> bool {
    let name = doc.get("name").and_then(Value::as_str);
    docs.iter().enumerate().any(|(i, other)| {
        Some(i) != skip && name.is_some() && other.get("name").and_then(Value::as_str) == name
    })
}

/// Merge-patch: apply only the provided fields. Identity fields stay
/// server-owned.
fn merge_patch(target: &mut Value, patch: Map<String, Value>) {
    if let Some(obj) = target.as_object_mut() {
        for (key, value) in patch {
            if key == "id" || key == "createdAt" {
                continue;
            }
            obj.insert(key, value);
        }
    }
}

fn filter_docs(docs: &[Value], query: &ListQuery) -> Vec<Value> {
    let filter_set = FilterSet {
        filters: query.filters.clone(),
    };
    docs.iter().filter(|d| filter_set.matches(d)).cloned().collect()
}

fn sort_docs(docs: &mut [Value], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    docs.sort_by(|a, b| {
        for key in keys {
            let ordering = match (a.get(&key.field), b.get(&key.field)) {
                (Some(Value::Number(x)), Some(Value::Number(y))) => {
                    let x = x.as_f64().unwrap_or(0.0);
                    let y = y.as_f64().unwrap_or(0.0);
                    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
                }
                (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
                (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                _ => Ordering::Equal,
            };
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn paginate(docs: Vec<Value>, query: &ListQuery) -> Vec<Value> {
    let bounds = PageBounds::new(query.page, query.limit);
    docs.into_iter()
        .skip(bounds.start)
        .take(query.limit)
        .collect()
}

/// Keep only the selected fields; `id` is always retained
fn project(doc: Value, query: &ListQuery) -> Value {
    let Some(fields) = &query.select else {
        return doc;
    };
    if let Value::Object(obj) = doc {
        let filtered: Map<String, Value> = obj
            .into_iter()
            .filter(|(k, _)| k == "id" || fields.contains(k))
            .collect();
        Value::Object(filtered)
    } else {
        doc
    }
}

fn doc_location(doc: &Value) -> Option<GeoPoint> {
    let location: Location = serde_json::from_value(doc.get("location")?.clone()).ok()?;
    let [lng, lat] = location.coordinates;
    Some(GeoPoint { lat, lng })
}

/// Attach `[{id, title}]` summaries of a bootcamp's courses
fn populate_courses(record: &mut Value, courses: &[Value]) {
    let id = record.get("id").and_then(Value::as_str).map(str::to_string);
    if let (Some(id), Some(obj)) = (id, record.as_object_mut()) {
        let summaries: Vec<Value> = courses
            .iter()
            .filter(|c| c.get("bootcamp").and_then(Value::as_str) == Some(id.as_str()))
            .map(|c| {
                json!({
                    "id": c.get("id").cloned().unwrap_or(Value::Null),
                    "title": c.get("title").cloned().unwrap_or(Value::Null),
                })
            })
            .collect();
        obj.insert("courses".to_string(), Value::Array(summaries));
    }
}

/// Replace a course's owner reference with `{id, name, description}`
fn populate_bootcamp(record: &mut Value, bootcamps: &[Value]) {
    let owner_id = record
        .get("bootcamp")
        .and_then(Value::as_str)
        .map(str::to_string);
    let Some(owner_id) = owner_id else {
        return;
    };

    let summary = bootcamps
        .iter()
        .find(|b| b.get("id").and_then(Value::as_str) == Some(owner_id.as_str()))
        .map(|b| {
            json!({
                "id": b.get("id").cloned().unwrap_or(Value::Null),
                "name": b.get("name").cloned().unwrap_or(Value::Null),
                "description": b.get("description").cloned().unwrap_or(Value::Null),
            })
        });

    if let (Some(summary), Some(obj)) = (summary, record.as_object_mut()) {
        obj.insert("bootcamp".to_string(), summary);
    }
}

/// Pre-delete hook: removing a bootcamp removes every course that
/// references it
fn cascade_delete_courses(collections: &mut Collections, bootcamp_id: &str) {
    collections
        .courses
        .retain(|c| c.get("bootcamp").and_then(Value::as_str) != Some(bootcamp_id));
}

/// Average of course tuitions, rounded up to the nearest ten; cleared when
/// the bootcamp has no courses
fn recompute_average_cost(collections: &mut Collections, bootcamp_id: &str) {
    let tuitions: Vec<f64> = collections
        .courses
        .iter()
        .filter(|c| c.get("bootcamp").and_then(Value::as_str) == Some(bootcamp_id))
        .filter_map(|c| c.get("tuition").and_then(Value::as_f64))
        .collect();

    let Some(bootcamp) = collections
        .bootcamps
        .iter_mut()
        .find(|b| b.get("id").and_then(Value::as_str) == Some(bootcamp_id))
    else {
        return;
    };
    let Some(obj) = bootcamp.as_object_mut() else {
        return;
    };

    if tuitions.is_empty() {
        obj.remove("averageCost");
    } else {
        let average = tuitions.iter().sum::<f64>() / tuitions.len() as f64;
        let rounded = (average / 10.0).ceil() * 10.0;
        obj.insert("averageCost".to_string(), json!(rounded));
    }
}
