use pretty_assertions::assert_eq;
use serde_json::json;
use serial_test::serial;
use stor_bind::{BindConfig, BindError, Engine, Stor, StoreOptions};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// ── The full scenario: seed, write, rebind, uncache ───────────────

#[tokio::test]
async fn user_name_scenario() {
    init_logging();
    let config = BindConfig::memory().with_scope("User");

    let name = Stor::bind::<String>(
        config.clone(),
        "name",
        StoreOptions::with_default("anonymous".to_string()),
    )
    .unwrap();
    assert_eq!(name.get().as_deref(), Some("anonymous"));
    name.ready().await;

    name.set("alice".to_string());
    assert_eq!(name.get().as_deref(), Some("alice"));
    Stor::barrier().await;

    // a fresh handle sees the persisted value, not the default
    let rebound = Stor::bind::<String>(
        config.clone(),
        "name",
        StoreOptions::with_default("anonymous".to_string()),
    )
    .unwrap();
    rebound.ready().await;
    Stor::barrier().await;
    assert_eq!(rebound.get().as_deref(), Some("alice"));

    // uncache restores first-access-ever behavior
    Stor::uncache(config.clone(), "name").await.unwrap();
    let reseeded = Stor::bind::<String>(
        config,
        "name",
        StoreOptions::with_default("anonymous".to_string()),
    )
    .unwrap();
    reseeded.ready().await;
    Stor::barrier().await;
    assert_eq!(reseeded.get().as_deref(), Some("anonymous"));
}

// ── Local engine ──────────────────────────────────────────────────

#[tokio::test]
async fn local_engine_persists_under_storage_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = BindConfig::local()
        .with_scope("Settings")
        .with_storage_dir(dir.path());

    let theme = Stor::bind::<String>(
        config.clone(),
        "theme",
        StoreOptions::with_default("dark".to_string()),
    )
    .unwrap();
    theme.ready().await;
    theme.set("light".to_string());
    Stor::barrier().await;

    assert!(dir.path().join("stor.local.json").exists());

    let rebound =
        Stor::bind::<String>(config, "theme", StoreOptions::with_default("dark".to_string()))
            .unwrap();
    rebound.ready().await;
    Stor::barrier().await;
    assert_eq!(rebound.get().as_deref(), Some("light"));
}

// ── Indexed engine ────────────────────────────────────────────────

#[tokio::test]
async fn indexed_engine_persists_under_storage_dir() {
    let dir = tempfile::tempdir().unwrap();
    let config = BindConfig::indexed()
        .with_scope("Settings")
        .with_storage_dir(dir.path());

    let volume = Stor::bind::<u32>(config.clone(), "volume", StoreOptions::with_default(40)).unwrap();
    volume.ready().await;
    volume.set(70);
    Stor::barrier().await;

    assert!(dir.path().join("stor.indexed.db").exists());

    let rebound = Stor::bind::<u32>(config, "volume", StoreOptions::with_default(40)).unwrap();
    rebound.ready().await;
    Stor::barrier().await;
    assert_eq!(rebound.get(), Some(70));
}

// ── File engines ──────────────────────────────────────────────────

#[tokio::test]
async fn json_file_engine_writes_the_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("window.json");
    let config = BindConfig::json_file(&path).with_scope("Window");

    let size = Stor::bind::<Vec<u32>>(config.clone(), "size", StoreOptions::new()).unwrap();
    size.ready().await;
    size.set(vec![1280, 720]);
    Stor::barrier().await;

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(on_disk, json!([1280, 720]));

    let rebound = Stor::bind::<Vec<u32>>(config, "size", StoreOptions::new()).unwrap();
    rebound.ready().await;
    Stor::barrier().await;
    assert_eq!(rebound.get(), Some(vec![1280, 720]));
}

#[tokio::test]
async fn raw_file_engine_stores_plain_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("motd.txt");
    let config = BindConfig::file(&path).with_scope("App");

    let motd = Stor::bind::<String>(config, "motd", StoreOptions::new()).unwrap();
    motd.ready().await;
    motd.set("hello there".to_string());
    Stor::barrier().await;

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(raw, "hello there");
}

// ── Misconfiguration fails at bind time ───────────────────────────

#[tokio::test]
async fn file_engine_without_path_fails_fast() {
    let config = BindConfig::new(Engine::File);
    let err = Stor::bind::<String>(config, "motd", StoreOptions::new()).unwrap_err();
    assert!(matches!(err, BindError::MissingFilePath { engine: Engine::File }));
    assert!(format!("{err}").contains("file path"));
}

#[tokio::test]
async fn file_engine_with_empty_path_fails_fast() {
    let config = BindConfig::file("");
    let err = Stor::bind::<String>(config, "motd", StoreOptions::new()).unwrap_err();
    assert!(matches!(err, BindError::Store(_)));
}

#[tokio::test]
async fn empty_property_name_fails_fast() {
    let err = Stor::bind::<String>(BindConfig::memory(), "", StoreOptions::new()).unwrap_err();
    assert!(matches!(err, BindError::EmptyProperty));

    let err = Stor::uncache(BindConfig::memory(), "").await.unwrap_err();
    assert!(matches!(err, BindError::EmptyProperty));
}

#[tokio::test]
async fn bind_error_display() {
    let err = BindError::EmptyProperty;
    assert!(format!("{err}").contains("must not be empty"));

    let err = BindError::MissingFilePath {
        engine: Engine::JsonFile,
    };
    assert!(format!("{err}").contains("json"));
}

// ── Environment gating ────────────────────────────────────────────

#[tokio::test]
#[serial]
async fn local_engine_without_storage_root_degrades_to_noop() {
    init_logging();
    let saved_home = std::env::var_os("HOME");
    let saved_profile = std::env::var_os("USERPROFILE");
    unsafe {
        std::env::remove_var("HOME");
        std::env::remove_var("USERPROFILE");
    }

    let config = BindConfig::local().with_scope("Gated");
    let name = Stor::bind::<String>(
        config.clone(),
        "name",
        StoreOptions::with_default("anonymous".to_string()),
    )
    .unwrap();

    // binder logic is unchanged: defaults seed in memory, writes "succeed"
    assert_eq!(name.get().as_deref(), Some("anonymous"));
    name.set("alice".to_string());
    assert_eq!(name.get().as_deref(), Some("alice"));
    name.ready().await;
    Stor::barrier().await;

    // nothing was persisted anywhere: a fresh handle starts over
    let rebound = Stor::bind::<String>(
        config,
        "name",
        StoreOptions::with_default("anonymous".to_string()),
    )
    .unwrap();
    rebound.ready().await;
    Stor::barrier().await;
    assert_eq!(rebound.get().as_deref(), Some("anonymous"));

    unsafe {
        match saved_home {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }
        match saved_profile {
            Some(profile) => std::env::set_var("USERPROFILE", profile),
            None => std::env::remove_var("USERPROFILE"),
        }
    }
}
