use httpmock::prelude::*;
use pkg_ferry::adapters::dropbox::{DropboxStore, SYNC_COMPLETE_JOB};
use pkg_ferry::domain::model::{JobId, JobStatus, StatOutcome};
use pkg_ferry::domain::ports::RemoteStore;

fn store(server: &MockServer) -> DropboxStore {
    DropboxStore::with_base_url("test-token".to_string(), server.base_url())
}

#[tokio::test]
async fn test_stat_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2/files/get_metadata")
            .body_contains(r#""path":"/dest/a.pkg""#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({".tag": "file", "name": "a.pkg"}));
    });

    assert_eq!(store(&server).stat("/dest/a.pkg").await, StatOutcome::Found);
    mock.assert();
}

#[tokio::test]
async fn test_stat_not_found_on_conflict_with_not_found_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/get_metadata");
        then.status(409).json_body(serde_json::json!({
            "error_summary": "path/not_found/..",
            "error": {".tag": "path", "path": {".tag": "not_found"}}
        }));
    });

    assert_eq!(store(&server).stat("/dest/a.pkg").await, StatOutcome::NotFound);
}

#[tokio::test]
async fn test_stat_rate_limited() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/get_metadata");
        then.status(429);
    });

    assert_eq!(
        store(&server).stat("/dest/a.pkg").await,
        StatOutcome::RateLimited
    );
}

#[tokio::test]
async fn test_stat_server_error_is_transient() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/get_metadata");
        then.status(500);
    });

    assert_eq!(
        store(&server).stat("/dest/a.pkg").await,
        StatOutcome::Transient
    );
}

#[tokio::test]
async fn test_stat_other_conflict_is_transient() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/get_metadata");
        then.status(409)
            .json_body(serde_json::json!({"error_summary": "path/restricted_content/.."}));
    });

    assert_eq!(
        store(&server).stat("/dest/a.pkg").await,
        StatOutcome::Transient
    );
}

#[tokio::test]
async fn test_list_children_follows_pagination() {
    let server = MockServer::start();
    let first = server.mock(|when, then| {
        when.method(POST)
            .path("/2/files/list_folder")
            .body_contains(r#""path":"/dest""#);
        then.status(200).json_body(serde_json::json!({
            "entries": [{".tag": "file", "name": "A.pkg"}],
            "cursor": "cursor-1",
            "has_more": true
        }));
    });
    let second = server.mock(|when, then| {
        when.method(POST)
            .path("/2/files/list_folder/continue")
            .body_contains(r#""cursor":"cursor-1""#);
        then.status(200).json_body(serde_json::json!({
            "entries": [{".tag": "file", "name": "B.pkg"}],
            "cursor": "cursor-2",
            "has_more": false
        }));
    });

    let names = store(&server).list_children("/dest/").await.unwrap();
    assert_eq!(names, vec!["A.pkg", "B.pkg"]);
    first.assert();
    second.assert();
}

#[tokio::test]
async fn test_delete_non_success_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/delete_v2");
        then.status(409)
            .json_body(serde_json::json!({"error_summary": "path_lookup/not_found/.."}));
    });

    assert!(store(&server).delete("/dest/A (1).pkg").await.is_err());
}

#[tokio::test]
async fn test_copy_from_url_returns_async_job_id() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/2/files/save_url")
            .body_contains(r#""url":"http://cdn/a.pkg""#);
        then.status(200).json_body(serde_json::json!({
            ".tag": "async_job_id",
            "async_job_id": "dbjid:abc123"
        }));
    });

    let job = store(&server)
        .copy_from_url("/dest/a.pkg", "http://cdn/a.pkg")
        .await
        .unwrap();
    assert_eq!(job, JobId("dbjid:abc123".to_string()));
    mock.assert();
}

#[tokio::test]
async fn test_copy_from_url_synchronous_complete() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/save_url");
        then.status(200)
            .json_body(serde_json::json!({".tag": "complete", "name": "a.pkg"}));
    });

    let s = store(&server);
    let job = s.copy_from_url("/dest/a.pkg", "http://cdn/a.pkg").await.unwrap();
    assert_eq!(job.as_str(), SYNC_COMPLETE_JOB);

    // The sentinel resolves without a status round-trip.
    assert_eq!(s.job_status(&job).await.unwrap(), JobStatus::Complete);
}

#[tokio::test]
async fn test_copy_from_url_error_status_propagates() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/2/files/save_url");
        then.status(409)
            .json_body(serde_json::json!({"error_summary": "path/disallowed_name/.."}));
    });

    assert!(store(&server)
        .copy_from_url("/dest/a.pkg", "http://cdn/a.pkg")
        .await
        .is_err());
}

#[tokio::test]
async fn test_job_status_tags() {
    let cases = [
        ("in_progress", JobStatus::Pending),
        ("complete", JobStatus::Complete),
        ("failed", JobStatus::Failed),
    ];

    for (tag, expected) in cases {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/2/files/save_url/check_job_status")
                .body_contains(r#""async_job_id":"dbjid:abc123""#);
            then.status(200).json_body(serde_json::json!({".tag": tag}));
        });

        let status = store(&server)
            .job_status(&JobId("dbjid:abc123".to_string()))
            .await
            .unwrap();
        assert_eq!(status, expected, "tag {}", tag);
    }
}
