use std::path::PathBuf;
use std::sync::Arc;

use launchpad_common::error::{LaunchError, ResolutionError};
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::browser::{Browser, BrowserKind};
use launchpad_common::models::item::LaunchableItem;
use launchpad_core::launcher::credentials::{
    CredentialInjectionStrategy, ExpectStrategy, SshpassStrategy,
};
use launchpad_core::launcher::LaunchOutcome;
use launchpad_core::{InstalledBrowsers, LaunchDispatcher};

use crate::support::{RecordingSpawner, Spawned};

const ITEMS: &str = r#"[
    {
        "type": "bookmark",
        "id": "router",
        "name": "Router",
        "networkAddresses": { "local": "192.168.1.1", "tailscale": "100.64.0.1" },
        "protocol": "http",
        "path": "admin"
    },
    {
        "type": "ssh",
        "id": "pi",
        "name": "Raspberry Pi",
        "networkAddresses": { "local": "pi.local" },
        "username": "pi",
        "port": 2222
    },
    {
        "type": "app",
        "id": "notes",
        "name": "Notes",
        "appPath": "/usr/bin/notes",
        "arguments": ["--new"]
    },
    {
        "type": "bookmark",
        "id": "vpn-only",
        "name": "VPN only",
        "networkAddresses": { "vpn": "10.8.0.2" }
    }
]"#;

fn items() -> Vec<LaunchableItem> {
    serde_json::from_str(ITEMS).unwrap()
}

fn firefox() -> Browser {
    Browser {
        id: "firefox".to_string(),
        name: "Firefox".to_string(),
        path: PathBuf::from("/usr/bin/firefox"),
        kind: BrowserKind::Executable,
    }
}

fn dispatcher(spawner: Arc<RecordingSpawner>, strategies: Vec<Box<dyn CredentialInjectionStrategy>>) -> LaunchDispatcher {
    let browsers: InstalledBrowsers = InstalledBrowsers::from_browsers(vec![firefox()]);
    LaunchDispatcher::new(spawner, Arc::new(browsers), strategies)
}

#[tokio::test]
async fn launch_all_keeps_going_past_failures() {
    let spawner: Arc<RecordingSpawner> = Arc::new(RecordingSpawner::default());
    let dispatcher: LaunchDispatcher = dispatcher(spawner.clone(), Vec::new());

    let outcomes: Vec<LaunchOutcome> = dispatcher
        .launch_all(&items(), NetworkProfile::Tailscale, Some("firefox"))
        .await;

    let ids: Vec<&str> = outcomes.iter().map(|o| o.item_id.as_str()).collect();
    assert_eq!(ids, vec!["router", "pi", "notes", "vpn-only"]);
    assert!(outcomes[..3].iter().all(|o| o.result.is_ok()));
    assert!(matches!(
        outcomes[3].result,
        Err(LaunchError::Resolution(ResolutionError::NoAddress(NetworkProfile::Tailscale)))
    ));

    let spawned: Vec<Spawned> = spawner.spawned();
    assert_eq!(spawned.len(), 3);
    assert_eq!(
        spawned[0],
        Spawned::Browser("firefox".to_string(), "http://100.64.0.1/admin".to_string())
    );
    assert!(matches!(&spawned[1], Spawned::Terminal(argv) if argv[0] == "ssh" && argv.contains(&"pi@pi.local".to_string())));
    assert_eq!(
        spawned[2],
        Spawned::App("/usr/bin/notes".to_string(), vec!["--new".to_string()])
    );
}

#[tokio::test]
async fn unknown_browser_falls_back_to_the_default_handler() {
    let spawner: Arc<RecordingSpawner> = Arc::new(RecordingSpawner::default());
    let dispatcher: LaunchDispatcher = dispatcher(spawner.clone(), Vec::new());

    dispatcher
        .launch(&items()[0], NetworkProfile::Local, Some("netscape"), None)
        .await
        .unwrap();

    assert_eq!(
        spawner.spawned(),
        vec![Spawned::DefaultHandler("http://192.168.1.1/admin".to_string())]
    );
}

#[tokio::test]
async fn password_goes_through_the_first_available_helper() {
    let spawner: Arc<RecordingSpawner> = Arc::new(RecordingSpawner::default());
    let strategies: Vec<Box<dyn CredentialInjectionStrategy>> = vec![
        Box::new(SshpassStrategy::with_availability(false)),
        Box::new(ExpectStrategy::with_availability(true)),
    ];
    let dispatcher: LaunchDispatcher = dispatcher(spawner.clone(), strategies);

    dispatcher
        .launch(&items()[1], NetworkProfile::Local, None, Some("raspberry"))
        .await
        .unwrap();

    let spawned: Vec<Spawned> = spawner.spawned();
    let Spawned::Terminal(argv) = &spawned[0] else {
        panic!("expected a terminal, got {spawned:?}");
    };
    assert_eq!(argv[0], "expect");
    assert!(argv.iter().any(|arg| arg.contains("2222")));
}

#[tokio::test]
async fn password_without_helpers_opens_an_interactive_session() {
    let spawner: Arc<RecordingSpawner> = Arc::new(RecordingSpawner::default());
    let strategies: Vec<Box<dyn CredentialInjectionStrategy>> = vec![
        Box::new(SshpassStrategy::with_availability(false)),
        Box::new(ExpectStrategy::with_availability(false)),
    ];
    let dispatcher: LaunchDispatcher = dispatcher(spawner.clone(), strategies);

    dispatcher
        .launch(&items()[1], NetworkProfile::Local, None, Some("raspberry"))
        .await
        .unwrap();

    let spawned: Vec<Spawned> = spawner.spawned();
    let Spawned::Terminal(argv) = &spawned[0] else {
        panic!("expected a terminal, got {spawned:?}");
    };
    assert_eq!(argv[0], "ssh");
    assert!(!argv.iter().any(|arg| arg.contains("raspberry")));
}
