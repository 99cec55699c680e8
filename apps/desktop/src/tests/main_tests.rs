use super::*;
use axum::{routing::post, Json, Router};
use tokio::net::TcpListener;

fn fields(pairs: &[&str]) -> Vec<String> {
    pairs.iter().map(|pair| pair.to_string()).collect()
}

#[test]
fn builds_commands_from_typed_fields() {
    assert_eq!(
        build_command("setCatSize", &fields(&["size=125"])).expect("command"),
        OutboundCommand::SetCatSize { size: 125 }
    );
    assert_eq!(
        build_command("selectHat", &fields(&["name=Top Hat"])).expect("command"),
        OutboundCommand::SelectHat {
            name: "Top Hat".into()
        }
    );
    assert_eq!(
        build_command("setCatFlip", &fields(&["flipped=true"])).expect("command"),
        OutboundCommand::SetCatFlip { flipped: true }
    );
    assert_eq!(
        build_command("hideWindow", &[]).expect("command"),
        OutboundCommand::HideWindow
    );
}

#[test]
fn rejects_unknown_commands_and_bad_fields() {
    assert!(build_command("launchRocket", &[]).is_err());
    assert!(build_command("setCatSize", &fields(&["size=big"])).is_err());
    assert!(build_command("setCatSize", &fields(&["size"])).is_err());
}

#[test]
fn preference_values_are_checked_by_key() {
    assert!(check_preference("openBongoDarkMode", "true").is_ok());
    assert!(check_preference("openBongoDarkMode", "1").is_err());
    assert!(check_preference("openBongoCatSize", "150").is_ok());
    assert!(check_preference("openBongoUIOffset", "-20").is_ok());
    assert!(check_preference("openBongoAccentColor", "#ff8800").is_ok());
    assert!(check_preference("openBongoAccentColor", "orange").is_err());
    assert!(check_preference("openBongo_rightArmOffset_size_75", "4.5").is_ok());
    assert!(check_preference("openBongo_rightArmOffset_size_75", "NaN").is_err());
    assert!(check_preference("somethingElse", "1").is_err());
}

#[test]
fn prefs_commands_round_through_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("preferences.json");
    let mut out = Vec::new();

    run_prefs(
        &path,
        PrefsCommand::Set {
            key: "openBongoSFXVolume".into(),
            value: "40".into(),
        },
        &mut out,
    )
    .expect("set");
    run_prefs(
        &path,
        PrefsCommand::Set {
            key: "openBongoDarkMode".into(),
            value: "true".into(),
        },
        &mut out,
    )
    .expect("set");

    out.clear();
    run_prefs(&path, PrefsCommand::List, &mut out).expect("list");
    assert_eq!(
        String::from_utf8(out.clone()).expect("utf8"),
        "openBongoDarkMode=true\nopenBongoSFXVolume=40\n"
    );

    run_prefs(
        &path,
        PrefsCommand::Remove {
            key: "openBongoDarkMode".into(),
        },
        &mut out,
    )
    .expect("remove");
    assert!(run_prefs(
        &path,
        PrefsCommand::Get {
            key: "openBongoDarkMode".into()
        },
        &mut out
    )
    .is_err());
}

#[test]
fn check_reports_parsed_and_dropped_messages() {
    let message = check_message(r#"{"type":"sfxVolume","data":{"volume":30}}"#).expect("parsed");
    assert_eq!(message, InboundMessage::SfxVolume(30));
    assert!(check_message(r#"{"type":"sfxVolume","data":{"volume":300}}"#).is_err());
    assert!(check_message("nope").is_err());
}

#[tokio::test]
async fn send_posts_the_command_json() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/api/message",
        post(|Json(body): Json<Value>| async move { body["type"].as_str().unwrap_or("").to_string() }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let report = send(
        &format!("http://{addr}"),
        &OutboundCommand::SetSfxVolume { volume: 55 },
    )
    .await
    .expect("delivered");
    assert_eq!(report.status, 200);
    assert_eq!(report.body, "setSFXVolume");
}

#[test]
fn send_defaults_to_the_shared_backend_url() {
    if std::env::var_os("OPENBONGO_BACKEND_URL").is_some() {
        return;
    }
    let cli = Cli::parse_from(["bongoctl", "send", "hideWindow"]);
    match cli.command {
        Commands::Send { backend_url, kind, .. } => {
            assert_eq!(backend_url, DEFAULT_BACKEND_URL);
            assert_eq!(kind, "hideWindow");
        }
        other => panic!("unexpected command {other:?}"),
    }
}
