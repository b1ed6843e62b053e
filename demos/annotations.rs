//! Attaching human-readable notes to a document and removing them again.
//!
//! Run with: cargo run --example annotations

use serde_dyaml::{
    dyaml, merge_annotations, serialize, strip_annotations, Annotation, PathSegment,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let config = dyaml!({
        "database": {
            "host": "db01",
            "port": 5432
        },
        "workers": [
            {"name": "ingest", "threads": 4},
            {"name": "export", "threads": 2}
        ]
    });

    let notes = vec![
        Annotation::line(vec![], "Production settings"),
        Annotation::inline(
            vec!["database".into(), "port".into()],
            "port",
            "default PostgreSQL port",
        ),
        Annotation::line(vec!["workers".into(), PathSegment::Index(0)], "runs every minute"),
        // Nothing lives at this path, so the note is dropped.
        Annotation::line(vec!["cache".into()], "unused"),
    ];

    let annotated = merge_annotations(config.clone(), &notes);
    println!("Annotated:\n{}", serialize(&annotated)?);

    let plain = strip_annotations(annotated);
    assert_eq!(plain, config);
    println!("Stripped:\n{}", serialize(&plain)?);

    Ok(())
}
