use neko_viewer::domain::{ContainerRecord, HostBinding, PortMapping, ViewRecord};
use neko_viewer::services::{DiscoveryService, TerminationService};
use neko_viewer::test_support::{MockFailure, MockRuntime};
use std::collections::HashSet;
use std::sync::Arc;

fn create_services() -> (DiscoveryService, TerminationService, Arc<MockRuntime>) {
    let mock = Arc::new(MockRuntime::new());
    let discovery = DiscoveryService::new(mock.clone());
    let termination = TerminationService::new(mock.clone());
    (discovery, termination, mock)
}

fn published(container_port: &str, host_port: &str) -> PortMapping {
    PortMapping::new(container_port, vec![HostBinding::new(host_port)])
}

#[tokio::test]
async fn test_single_family_member_is_projected() {
    let (discovery, _, mock) = create_services();
    mock.add_container(
        ContainerRecord::new("4f2a9c1d7e8b0a1b2c3d4e5f", "neko-1")
            .with_tag("x/neko:latest")
            .with_port(published("8080/tcp", "9001")),
    );
    mock.add_container(ContainerRecord::new("0a1b2c3d4e5f6a7b8c9d", "other").with_tag("y/plain"));

    let views = discovery.discover("neko").await.unwrap();

    assert_eq!(
        views,
        vec![ViewRecord {
            name: "neko-1".to_string(),
            id: "4f2a9c1d7e8b".to_string(),
            port: "9001".to_string(),
            url: "http://localhost:9001".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_tag_only_match_appears_once() {
    let (discovery, _, mock) = create_services();
    mock.add_container(
        ContainerRecord::new("aaaaaaaaaaaa1111", "chromium-desk")
            .with_tag("ghcr.io/m1k1o/NEKO:chromium")
            .with_tag("registry.local/neko-chromium:v3")
            .with_port(published("8080/tcp", "9100")),
    );

    let views = discovery.discover("neko").await.unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].name, "chromium-desk");
}

#[tokio::test]
async fn test_non_members_never_appear() {
    let (discovery, _, mock) = create_services();
    mock.add_container(
        ContainerRecord::new("bbbbbbbbbbbb", "postgres")
            .with_tag("postgres:16")
            .with_port(published("5432/tcp", "5432")),
    );
    mock.add_container(
        ContainerRecord::new("cccccccccccc", "redis")
            .with_port(published("6379/tcp", "6379")),
    );

    assert!(discovery.discover("neko").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_container_without_bound_ports_is_excluded() {
    let (discovery, _, mock) = create_services();
    mock.add_container(
        ContainerRecord::new("dddddddddddd", "neko-headless")
            .with_port(PortMapping::unbound("8080/tcp"))
            .with_port(PortMapping::new("52000/udp", vec![HostBinding::default()])),
    );
    mock.add_container(ContainerRecord::new("eeeeeeeeeeee", "neko-noports"));

    assert!(discovery.discover("neko").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_multi_port_container_uses_first_bound_mapping() {
    let (discovery, _, mock) = create_services();
    mock.add_container(
        ContainerRecord::new("ffffffffffff", "neko-multi")
            .with_port(PortMapping::unbound("52000/udp"))
            .with_port(published("8080/tcp", "9201"))
            .with_port(published("9090/tcp", "9202")),
    );

    let views = discovery.discover("neko").await.unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].port, "9201");
    assert_eq!(views[0].url, "http://localhost:9201");
}

#[tokio::test]
async fn test_result_never_repeats_an_identifier() {
    let (discovery, _, mock) = create_services();
    // The same container reported twice, plus two ids sharing a short prefix.
    for (id, name, port) in [
        ("111111111111aaaa", "neko-a", "9001"),
        ("111111111111aaaa", "neko-a", "9001"),
        ("222222222222bbbb", "neko-b", "9002"),
        ("222222222222cccc", "neko-c", "9003"),
        ("333333333333dddd", "neko-d", "9004"),
    ] {
        mock.add_container(ContainerRecord::new(id, name).with_port(published("8080/tcp", port)));
    }

    let views = discovery.discover("NEKO").await.unwrap();
    let ids: HashSet<_> = views.iter().map(|v| v.id.as_str()).collect();

    assert_eq!(views.len(), ids.len());
    assert_eq!(views.len(), 3);
    let names: Vec<_> = views.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["neko-a", "neko-b", "neko-d"]);
}

#[tokio::test]
async fn test_killed_container_disappears_from_next_discovery() {
    let (discovery, termination, mock) = create_services();
    mock.add_container(
        ContainerRecord::new("4f2a9c1d7e8b0a1b", "neko-1").with_port(published("8080/tcp", "9001")),
    );
    mock.add_container(
        ContainerRecord::new("0a1b2c3d4e5f6a7b", "neko-2").with_port(published("8080/tcp", "9002")),
    );

    let before = discovery.discover("neko").await.unwrap();
    assert_eq!(before.len(), 2);

    let outcome = termination.kill("4f2a9c1d7e8b").await;
    assert!(outcome.success);
    assert_eq!(outcome.message, "Container 4f2a9c1d7e8b killed");

    let after = discovery.discover("neko").await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name, "neko-2");
}

#[tokio::test]
async fn test_kill_nonexistent_returns_failed_outcome() {
    let (_, termination, mock) = create_services();

    let outcome = termination.kill("nonexistent-id").await;

    assert!(!outcome.success);
    assert!(!outcome.message.is_empty());
    assert_eq!(mock.get_commands(), vec!["kill:nonexistent-id"]);
}

#[tokio::test]
async fn test_kill_converts_every_failure_kind() {
    let (_, termination, mock) = create_services();
    mock.add_container(ContainerRecord::new("abcabcabcabc", "neko"));

    for failure in [MockFailure::Unavailable, MockFailure::NotFound, MockFailure::Command] {
        mock.set_fail_on("kill", failure);
        let outcome = termination.kill("abcabcabcabc").await;
        assert!(!outcome.success, "{failure:?} should not succeed");
    }

    mock.clear_failure();
    assert!(termination.kill("abcabcabcabc").await.success);
}

#[tokio::test]
async fn test_listing_failure_propagates() {
    let (discovery, _, mock) = create_services();
    mock.set_fail_on("list", MockFailure::Command);

    assert!(discovery.discover("neko").await.is_err());
}

#[tokio::test]
async fn test_concurrent_discoveries_are_independent() {
    let mock = Arc::new(MockRuntime::new());
    mock.add_container(
        ContainerRecord::new("4f2a9c1d7e8b", "neko-1").with_port(published("8080/tcp", "9001")),
    );
    let discovery = Arc::new(DiscoveryService::new(mock.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let discovery = discovery.clone();
            tokio::spawn(async move { discovery.discover("neko").await })
        })
        .collect();

    for handle in handles {
        let views = handle.await.unwrap().unwrap();
        assert_eq!(views.len(), 1);
    }
    assert_eq!(mock.get_commands().len(), 8);
}
