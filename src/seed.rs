//! Data seeder
//!
//! Bulk-loads JSON fixture files through the store's normal validation
//! paths, or wipes everything. Fixture ids are honored so seed courses can
//! reference seed bootcamps.

use std::error::Error;
use std::path::Path;

use serde_json::Value;

use crate::logger::Logger;
use crate::store::Store;

/// Import `bootcamps.json` (required) and `courses.json` (optional) from
/// the data directory
pub fn import(store: &Store, data_dir: &Path) -> Result<(), Box<dyn Error>> {
    let bootcamps = read_records(&data_dir.join("bootcamps.json"))?;
    let courses = match read_records(&data_dir.join("courses.json")) {
        Ok(records) => records,
        Err(_) => Vec::new(),
    };

    let (inserted_bootcamps, inserted_courses) = store.import(bootcamps, courses)?;

    Logger::info(
        "data_imported",
        &[
            ("bootcamps", &inserted_bootcamps.to_string()),
            ("courses", &inserted_courses.to_string()),
        ],
    );
    Ok(())
}

/// Delete every record
pub fn destroy(store: &Store) -> Result<(), Box<dyn Error>> {
    store.clear()?;
    Logger::info("data_destroyed", &[]);
    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<Value>, Box<dyn Error>> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("could not read {}: {}", path.display(), e))?;
    let records: Vec<Value> = serde_json::from_slice(&bytes)
        .map_err(|e| format!("could not parse {}: {}", path.display(), e))?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use uuid::Uuid;

    #[test]
    fn test_import_and_destroy() {
        let dir = TempDir::new().unwrap();
        let bootcamp_id = Uuid::new_v4().to_string();

        std::fs::write(
            dir.path().join("bootcamps.json"),
            serde_json::to_vec(&json!([{
                "id": bootcamp_id,
                "name": "Devworks",
                "description": "Full stack",
                "address": "Boston MA"
            }]))
            .unwrap(),
        )
        .unwrap();
        std::fs::write(
            dir.path().join("courses.json"),
            serde_json::to_vec(&json!([{
                "title": "Rust",
                "description": "Systems",
                "weeks": 10,
                "tuition": 12000,
                "minimumSkill": "intermediate",
                "bootcamp": bootcamp_id
            }]))
            .unwrap(),
        )
        .unwrap();

        let store = Store::in_memory();
        import(&store, dir.path()).unwrap();
        assert_eq!(store.counts().unwrap(), (1, 1));

        // Seed ids are preserved
        assert!(store.get_bootcamp(&bootcamp_id).is_ok());

        destroy(&store).unwrap();
        assert_eq!(store.counts().unwrap(), (0, 0));
    }

    #[test]
    fn test_missing_courses_file_is_fine() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("bootcamps.json"),
            serde_json::to_vec(&json!([{
                "name": "Devworks",
                "description": "Full stack",
                "address": "Boston MA"
            }]))
            .unwrap(),
        )
        .unwrap();

        let store = Store::in_memory();
        import(&store, dir.path()).unwrap();
        assert_eq!(store.counts().unwrap(), (1, 0));
    }

    #[test]
    fn test_missing_bootcamps_file_errors() {
        let dir = TempDir::new().unwrap();
        let store = Store::in_memory();
        assert!(import(&store, dir.path()).is_err());
    }
}
