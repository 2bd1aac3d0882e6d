use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Two snapshot files and a session path inside a temporary directory.
pub struct SnapshotDir {
    _dir: TempDir,
    pub source: PathBuf,
    pub target: PathBuf,
    pub session: PathBuf,
}

impl SnapshotDir {
    pub fn new(source: &Value, target: &Value) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let snapshots = Self {
            source: dir.path().join("source.json"),
            target: dir.path().join("target.json"),
            session: dir.path().join("model.session.json"),
            _dir: dir,
        };
        snapshots.write_source(source);
        snapshots.write_target(target);
        snapshots
    }

    pub fn write_source(&self, model: &Value) {
        std::fs::write(&self.source, model.to_string()).expect("Failed to write source");
    }

    pub fn write_target(&self, model: &Value) {
        std::fs::write(&self.target, model.to_string()).expect("Failed to write target");
    }
}

pub fn source_model() -> Value {
    json!({
        "compatibilityLevel": 1200,
        "connections": [
            { "internalName": "c1", "name": "Warehouse", "definition": "Server=dw;Database=sales" }
        ],
        "tables": [
            {
                "internalName": "t1",
                "name": "Sales",
                "definition": { "columns": ["Amount", "Date"] },
                "measures": [
                    { "internalName": "m1", "name": "Total Sales", "definition": "SUM(Sales[Amount])" },
                    { "internalName": "m2", "name": "Margin", "definition": "[Total Sales] * 0.2" }
                ]
            },
            {
                "internalName": "t2",
                "name": "Budget",
                "definition": { "columns": ["Plan"] },
                "measures": [
                    { "internalName": "m4", "name": "Planned", "definition": "SUM(Budget[Plan])" }
                ]
            }
        ],
        "perspectives": [
            { "internalName": "p1", "name": "Finance", "definition": "Sales,Budget" }
        ],
        "roles": [
            { "internalName": "r1", "name": "Readers", "definition": "read" }
        ]
    })
}

pub fn target_model() -> Value {
    json!({
        "compatibilityLevel": 1200,
        "connections": [
            { "internalName": "c1", "name": "Warehouse", "definition": "Server=dw;Database=sales" }
        ],
        "tables": [
            {
                "internalName": "t1",
                "name": "Sales",
                "definition": { "columns": ["Amount", "Date"] },
                "measures": [
                    { "internalName": "m1", "name": "Total Sales", "definition": "SUM(Sales[Net])" },
                    { "internalName": "m3", "name": "Old Measure", "definition": "0" }
                ]
            }
        ],
        "perspectives": [
            { "internalName": "p1", "name": "Finance", "definition": "Sales,Budget" }
        ],
        "roles": [
            { "internalName": "r1", "name": "Readers", "definition": "read" },
            { "internalName": "r2", "name": "Admins", "definition": "admin" }
        ]
    })
}
