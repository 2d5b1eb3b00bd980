//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_lines_containing_except_files, find_non_export_lines_in_mod_files,
    path_exists,
};

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "diesel::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "diesel::",
            "reqwest::Client",
        ],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_does_not_reach_into_adapters() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter::", "crate::infrastructure::", "diesel::", "reqwest::"],
    );

    assert!(
        hits.is_empty(),
        "application layer should talk to ports only: {hits:#?}"
    );
}

#[test]
fn only_the_composition_root_builds_sqlite_adapters() {
    let hits = find_lines_containing_except_files(
        "src",
        &["SqliteFlightStore::new", "SqliteWeatherStore::new"],
        &[
            "src/infrastructure/bootstrap.rs",
            "src/adapter/outbound/sqlite/flight_store.rs",
            "src/adapter/outbound/sqlite/weather_store.rs",
        ],
    );

    assert!(
        hits.is_empty(),
        "sqlite stores should only be constructed in bootstrap: {hits:#?}"
    );
}

#[test]
fn application_and_cli_mod_rs_are_export_only() {
    for dir in ["src/application", "src/adapter/inbound"] {
        let violations = find_non_export_lines_in_mod_files(dir);
        assert!(
            violations.is_empty(),
            "found non-export content in mod.rs files: {violations:#?}"
        );
    }
}

#[test]
fn migrations_are_embedded_from_the_crate_root() {
    assert!(path_exists("migrations"), "migrations directory should exist");
}
