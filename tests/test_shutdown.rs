use simple_interest::server::shutdown::ShutdownManager;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_shutdown_manager_initialization() {
    let manager = ShutdownManager::new();
    assert!(!manager.is_shutting_down());
    assert_eq!(manager.active_connections(), 0);
}

#[tokio::test]
async fn test_signal_wakes_waiter() {
    let manager = Arc::new(ShutdownManager::new());
    let waiter = {
        let manager = manager.clone();
        tokio::spawn(async move { manager.wait_for_shutdown().await })
    };

    tokio::time::sleep(Duration::from_millis(20)).await;
    manager.signal_shutdown();

    tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("waiter was not woken")
        .unwrap();
    assert!(manager.is_shutting_down());
}

#[tokio::test]
async fn test_wait_returns_immediately_after_signal() {
    let manager = ShutdownManager::new();
    manager.signal_shutdown();
    tokio::time::timeout(Duration::from_millis(100), manager.wait_for_shutdown())
        .await
        .expect("wait should not block once signaled");
}

#[tokio::test]
async fn test_wait_for_connections_completes_immediately_when_zero() {
    let manager = ShutdownManager::new();

    let start = std::time::Instant::now();
    manager.wait_for_connections(Duration::from_secs(1)).await;

    assert!(start.elapsed() < Duration::from_millis(100));
}

#[tokio::test]
async fn test_wait_for_connections_times_out() {
    let manager = ShutdownManager::new();
    manager.increment_connections();

    let start = std::time::Instant::now();
    manager.wait_for_connections(Duration::from_millis(100)).await;

    assert!(start.elapsed() >= Duration::from_millis(90));
    assert_eq!(manager.active_connections(), 1);
}
