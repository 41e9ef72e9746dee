//! Unit tests for the github_client crate.

use super::*; // Import items from lib.rs
use serde_json::json;
use tracing_test::traced_test;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(mock_server: &MockServer) -> GitHubClient {
    let endpoints = ApiEndpoints::with_base_uri(&mock_server.uri());
    let token = SecretString::from("test-token".to_string());
    create_token_client(&token, &endpoints).unwrap()
}

fn webhook_json(id: u64, url: &str) -> serde_json::Value {
    json!({
        "type": "Organization",
        "id": id,
        "name": "web",
        "active": true,
        "events": ["push"],
        "config": {
            "url": url,
            "content_type": "json",
            "insecure_ssl": "0",
            "secret": "********"
        },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z"
    })
}

fn rule_json(id: &str, pattern: &str) -> serde_json::Value {
    json!({
        "id": id,
        "pattern": pattern,
        "allowsDeletions": false,
        "allowsForcePushes": false,
        "blocksCreations": false,
        "dismissesStaleReviews": true,
        "isAdminEnforced": false,
        "lockAllowsFetchAndMerge": false,
        "lockBranch": false,
        "requireLastPushApproval": false,
        "requiredApprovingReviewCount": 1,
        "requiresApprovingReviews": true,
        "requiresCodeOwnerReviews": false,
        "requiresCommitSignatures": false,
        "requiresConversationResolution": false,
        "requiresDeployments": false,
        "requiresLinearHistory": false,
        "requiresStatusChecks": false,
        "requiresStrictStatusChecks": false,
        "restrictsPushes": false,
        "restrictsReviewDismissals": false
    })
}

#[tokio::test]
async fn test_list_org_webhooks_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/test-org/hooks"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            webhook_json(1, "https://one.example.com"),
            webhook_json(2, "https://two.example.com")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_webhooks("test-org").await;

    if let Err(e) = &result {
        eprintln!("list_org_webhooks error: {e:?}");
    }
    let webhooks = result.unwrap();
    assert_eq!(webhooks.len(), 2);
    assert_eq!(webhooks[0].id, 1);
    assert_eq!(webhooks[1].config.url, "https://two.example.com");
}

#[tokio::test]
#[traced_test]
async fn test_list_org_webhooks_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orgs/missing-org/hooks"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.list_org_webhooks("missing-org").await;

    assert!(matches!(result, Err(Error::NotFound)));
    assert!(logs_contain("Received an error from GitHub"));
    assert!(logs_contain("status=404"));
}

#[tokio::test]
async fn test_create_org_webhook_posts_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orgs/target-org/hooks"))
        .and(body_partial_json(json!({
            "name": "web",
            "events": ["push"],
            "config": { "url": "https://one.example.com", "secret": "fresh" }
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(webhook_json(99, "https://one.example.com")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let payload = CreateWebhookPayload {
        name: "web".to_string(),
        active: true,
        events: vec!["push".to_string()],
        config: WebhookConfig {
            url: "https://one.example.com".to_string(),
            content_type: "json".to_string(),
            insecure_ssl: false,
            secret: Some("fresh".to_string()),
        },
    };

    let result = client.create_org_webhook("target-org", &payload).await;

    if let Err(e) = &result {
        eprintln!("create_org_webhook error: {e:?}");
    }
    assert_eq!(result.unwrap().id, 99);
}

#[tokio::test]
async fn test_create_org_webhook_validation_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/orgs/target-org/hooks"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{ "resource": "Hook", "code": "custom", "message": "Hook already exists" }]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let payload = CreateWebhookPayload {
        name: "web".to_string(),
        active: true,
        events: vec!["push".to_string()],
        config: WebhookConfig {
            url: "https://one.example.com".to_string(),
            content_type: "json".to_string(),
            insecure_ssl: false,
            secret: None,
        },
    };

    let result = client.create_org_webhook("target-org", &payload).await;

    match result {
        Err(Error::ApiError(message)) => assert_eq!(message, "Validation Failed"),
        other => panic!("Expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_repository_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query getRepo("))
        .and(body_partial_json(json!({
            "variables": { "owner": "test-org", "name": "widgets" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "repository": { "databaseId": 4242, "name": "widgets", "visibility": "PRIVATE" }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let repo = client.get_repository("test-org", "widgets").await.unwrap();

    assert_eq!(repo, Repository::new(4242, "widgets", "PRIVATE"));
}

#[tokio::test]
async fn test_get_repository_graphql_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": null },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to a Repository with the name 'test-org/missing'."
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let result = client.get_repository("test-org", "missing").await;

    assert!(matches!(result, Err(Error::GraphQl(_))));
}

#[tokio::test]
async fn test_list_repositories_walks_every_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query getRepos("))
        .and(body_partial_json(json!({ "variables": { "endCursor": null } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "repositories": {
                "nodes": [
                    { "databaseId": 1, "name": "alpha", "visibility": "PUBLIC" },
                    { "databaseId": 2, "name": "beta", "visibility": "PRIVATE" }
                ],
                "pageInfo": { "endCursor": "cursor-1", "hasNextPage": true }
            }}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query getRepos("))
        .and(body_partial_json(json!({ "variables": { "endCursor": "cursor-1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "organization": { "repositories": {
                "nodes": [ { "databaseId": 3, "name": "gamma", "visibility": "INTERNAL" } ],
                "pageInfo": { "endCursor": "cursor-2", "hasNextPage": false }
            }}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let repos = client.list_repositories("test-org").await.unwrap();

    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn test_list_branch_protection_rules_walks_every_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query getBranchProtectionRules("))
        .and(body_partial_json(json!({
            "variables": { "owner": "test-org", "name": "widgets", "endCursor": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "branchProtectionRules": {
                "nodes": [ rule_json("BPR_1", "main") ],
                "pageInfo": { "endCursor": "rules-1", "hasNextPage": true }
            }}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("query getBranchProtectionRules("))
        .and(body_partial_json(json!({ "variables": { "endCursor": "rules-1" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": { "branchProtectionRules": {
                "nodes": [ rule_json("BPR_2", "release/*") ],
                "pageInfo": { "endCursor": null, "hasNextPage": false }
            }}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);

    let rules = client
        .list_branch_protection_rules("test-org", "widgets")
        .await
        .unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].id, "BPR_1");
    assert_eq!(rules[1].pattern, "release/*");
    assert_eq!(rules[1].policy.required_approving_review_count, 1);
}

#[tokio::test]
async fn test_update_branch_protection_rule_sends_mutation_input() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_string_contains("mutation updateBranchProtectionRule("))
        .and(body_partial_json(json!({
            "variables": { "input": {
                "branchProtectionRuleId": "BPR_1",
                "pattern": "main",
                "requiresLinearHistory": true,
                "requiredApprovingReviewCount": 3
            }}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateBranchProtectionRule": { "clientMutationId": null } }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let rule = BranchProtectionRule {
        id: "BPR_1".to_string(),
        pattern: "main".to_string(),
        policy: BranchProtectionPolicy {
            requires_linear_history: true,
            required_approving_review_count: 3,
            ..Default::default()
        },
    };

    let result = client.update_branch_protection_rule(&rule).await;

    if let Err(e) = &result {
        eprintln!("update_branch_protection_rule error: {e:?}");
    }
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_branch_protection_rule_reports_graphql_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "updateBranchProtectionRule": null },
            "errors": [{ "message": "Could not resolve to a node with the global id of 'BPR_x'" }]
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let rule = BranchProtectionRule {
        id: "BPR_x".to_string(),
        pattern: "main".to_string(),
        policy: BranchProtectionPolicy::default(),
    };

    let result = client.update_branch_protection_rule(&rule).await;

    assert!(matches!(result, Err(Error::GraphQl(_))));
}

#[tokio::test]
async fn test_create_token_client_for_enterprise_host() {
    let endpoints = ApiEndpoints::for_host("ghes.example.com").unwrap();
    let token = SecretString::from("test-token".to_string());

    let client = create_token_client(&token, &endpoints).unwrap();

    assert_eq!(client.endpoints().base_uri(), "https://ghes.example.com");
}
