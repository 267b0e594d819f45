// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client wrapper specs: login, admin flows, jobs, storage.

use std::time::Duration;

use ae_cli::{expected, CliError, LoginExpectation};
use ae_core::{NameRegistry, ResourceKind};

use crate::prelude::*;

const UPGRADE_NOTICE: &str = "You are using Apolo CLI 25.1.0, however version 25.7.2 is available.\n    You should consider upgrading via the following command:\n        pip install --upgrade apolo-cli";

#[tokio::test]
async fn org_and_project_flow_round_trips() {
    trace_init();
    let bin = FakeApolo::new()
        .on("config login-with-token", "")
        .on("admin add-project", "")
        .on("admin add-org", "")
        .on(
            "admin get-orgs",
            &format!("{UPGRADE_NOTICE}\n Name\n e2e-org-one-ab12cd34\n e2e-org-two-ef56gh78"),
        )
        .on("admin get-projects", " Name\n e2e-proj-main-q1w2e3r4")
        .install();
    let cli = bin.cli();

    cli.login_with_token("e2e-bearer-token", "https://api.dev.apolo.us")
        .await
        .unwrap();
    cli.add_org("e2e-org-one-ab12cd34").await.unwrap();
    let orgs = cli.get_organizations().await.unwrap();
    assert_eq!(orgs, vec!["e2e-org-one-ab12cd34", "e2e-org-two-ef56gh78"]);

    cli.add_project("e2e-org-one-ab12cd34", "e2e-proj-main-q1w2e3r4")
        .await
        .unwrap();
    let projects = cli.get_projects("e2e-org-one-ab12cd34").await.unwrap();
    assert_eq!(projects, vec!["e2e-proj-main-q1w2e3r4"]);
}

#[tokio::test]
async fn login_verification_reports_mismatched_fields() {
    let bin = FakeApolo::new()
        .on(
            "config show",
            " API URL: https://api.dev.apolo.us/api/v1\n User Name: alice\n Current Org: acme",
        )
        .install();

    let expected_login =
        LoginExpectation::new("https://api.dev.apolo.us/api/v1", "alice").org("acme");
    bin.cli().verify_login(&expected_login).await.unwrap();

    let wrong = LoginExpectation::new("https://api.dev.apolo.us/api/v1", "bob")
        .org("acme")
        .project("main");
    let err = bin.cli().verify_login(&wrong).await.unwrap_err();
    match err {
        CliError::LoginMismatch { mismatches } => {
            assert_eq!(mismatches.len(), 2, "{mismatches:?}")
        }
        other => panic!("expected LoginMismatch, got {other}"),
    }
}

#[tokio::test]
async fn stderr_content_survives_verbatim_in_the_error() {
    let bin = FakeApolo::new()
        .on_err(
            "admin remove-org",
            "ERROR: Organization 'ghost-org' not found",
            72,
        )
        .install();

    let err = bin.cli().remove_org("ghost-org").await.unwrap_err();
    let output = err.output().unwrap_or_default();
    assert!(
        output.contains("ERROR: Organization 'ghost-org' not found"),
        "got: {output}"
    );
    assert!(expected::matches(
        output,
        &expected::not_found("Organization", "ghost-org")
    ));
}

#[tokio::test]
async fn permission_denial_matches_the_platform_template() {
    let detail = "user role 'user' cannot manage org 'acme'";
    let bin = FakeApolo::new()
        .on_err(
            "admin add-org-user",
            &expected::not_enough_permissions(detail),
            77,
        )
        .install();

    let err = bin
        .cli()
        .add_org_user("acme", "outsider", "manager")
        .await
        .unwrap_err();
    let output = err.output().unwrap_or_default();
    assert!(expected::is_permission_denied(output));
    assert!(expected::matches(
        output,
        &expected::not_enough_permissions(detail)
    ));
}

#[tokio::test]
async fn job_run_uses_registry_names_and_extracts_the_id() {
    let names = NameRegistry::new();
    let job_name = names.resolve(ResourceKind::Job, "trainer");

    let bin = FakeApolo::new()
        .on("run --name", "√ Job ID: job-e2e-1a2b3c\n√ Status: pending")
        .install();
    let id = bin
        .cli()
        .run_job(
            &job_name,
            "ghcr.io/apolo/ubuntu:latest",
            &["echo", "done"],
            Duration::from_secs(120),
        )
        .await
        .unwrap();

    assert_eq!(id.unwrap(), "job-e2e-1a2b3c");
    // The registry hands the same generated name to follow-up steps.
    assert_eq!(names.resolve(ResourceKind::Job, "trainer"), job_name);
}

#[tokio::test]
async fn storage_secret_and_disk_listings_parse() {
    let bin = FakeApolo::new()
        .on("mkdir storage:e2e-data", "")
        .on("ls storage:e2e-data", "file-a.bin\nfile-b.bin")
        .on("secret add", "")
        .on("secret ls", " Key\n db-password\n api-token")
        .on("disk create", "Disk disk-9f8e7d6c created")
        .on("disk ls", " Id         Storage\n disk-9f8e7d6c 1.0G")
        .install();
    let cli = bin.cli();

    cli.mkdir("storage:e2e-data").await.unwrap();
    assert_eq!(
        cli.list_storage("storage:e2e-data").await.unwrap(),
        vec!["file-a.bin", "file-b.bin"]
    );

    cli.add_secret("db-password", "hunter2").await.unwrap();
    assert_eq!(
        cli.list_secrets().await.unwrap(),
        vec!["db-password", "api-token"]
    );

    let disk = cli.create_disk("1G").await.unwrap();
    assert_eq!(disk.unwrap(), "disk-9f8e7d6c");
    assert_eq!(cli.list_disks().await.unwrap(), vec!["disk-9f8e7d6c"]);
}
