use super::*;
use client_core::RecordingSink;
use serde_json::json;
use shared::domain::CatalogKind;
use std::time::Duration;
use storage::{MemoryStore, RIGHT_ARM_OFFSET};

fn controller_with(entries: &[(&str, &str)]) -> PanelController<MemoryStore, RecordingSink> {
    let mut store = MemoryStore::new();
    for (key, value) in entries {
        store.set_item(key, value).expect("seed store");
    }
    PanelController::new(store, RecordingSink::new())
}

fn stored(controller: &PanelController<MemoryStore, RecordingSink>, key: &str) -> Option<String> {
    controller
        .preferences()
        .store()
        .get_item(key)
        .expect("read store")
}

#[test]
fn bootstrap_on_empty_store_sends_defaults_then_schedules_initial_requests() {
    let mut controller = controller_with(&[]);
    controller.bootstrap();

    assert_eq!(controller.state(), &PanelState::default());
    let sent = controller.sink().sent();
    let immediate: Vec<&str> = sent
        .iter()
        .filter(|s| s.delay.is_none())
        .map(|s| s.command.name())
        .collect();
    assert_eq!(
        immediate,
        vec![
            "setLeftArmOffset",
            "setRightArmOffset",
            "setAnimationVerticalOffset",
            "getCatPacks"
        ]
    );
    let delayed: Vec<&str> = sent
        .iter()
        .filter(|s| s.delay == Some(Duration::from_millis(100)))
        .map(|s| s.command.name())
        .collect();
    assert_eq!(
        delayed,
        vec![
            "getSelectedCatPack",
            "getSelectedHat",
            "getSelectedBonkPack",
            "getCatPacks"
        ]
    );
    assert_eq!(controller.take_particle_request(), Some(ParticleRequest::Restart));
    assert_eq!(controller.take_particle_request(), None);
}

#[test]
fn bootstrap_restores_preferences_and_size_scoped_offsets() {
    let mut controller = controller_with(&[
        ("openBongoDarkMode", "true"),
        ("openBongoCatSize", "125"),
        ("openBongoAccentColor", "#ff8800"),
        ("openBongoSFXVolume", "35"),
        ("openBongoParticleEffects", "false"),
        ("openBongoLeftArmOffset", "2.5"),
        ("openBongo_rightArmOffset_size_125", "7.5"),
        ("openBongoAnimationVerticalOffset", "-4"),
    ]);
    controller.bootstrap();

    let state = controller.state();
    assert!(state.dark_mode);
    assert_eq!(state.cat_size, 125);
    assert_eq!(state.accent_color, "#ff8800");
    assert_eq!(state.sfx_volume, 35);
    assert!(!state.particle_effects_enabled);
    assert_eq!(state.left_arm_offset, 2.5);
    assert_eq!(state.right_arm_offset, 7.5);
    assert_eq!(state.animation_vertical_offset, -4.0);

    assert_eq!(
        controller.sink().commands()[..3],
        [
            OutboundCommand::SetLeftArmOffset { offset: 2.5 },
            OutboundCommand::SetRightArmOffset { offset: 7.5 },
            OutboundCommand::SetAnimationVerticalOffset { offset: -4.0 },
        ]
    );
    assert_eq!(controller.take_particle_request(), None);
}

#[test]
fn unusable_stored_values_fall_back_to_defaults() {
    let mut controller = controller_with(&[
        ("openBongoCatSize", "9000"),
        ("openBongoParticleDensity", "0"),
        ("openBongoUIOffset", "abc"),
    ]);
    controller.bootstrap();
    assert_eq!(controller.state().cat_size, 100);
    assert_eq!(controller.state().particle_density, 100);
    assert_eq!(controller.state().ui_offset, 0);
}

#[test]
fn size_change_swaps_in_offsets_for_the_new_size() {
    let mut controller = controller_with(&[
        ("openBongo_rightArmOffset_size_150", "-12"),
        ("openBongoAnimationVerticalOffset", "3"),
    ]);
    controller.dispatch(UiAction::SetCatSize(150));

    assert_eq!(controller.state().right_arm_offset, -12.0);
    assert_eq!(controller.state().animation_vertical_offset, 3.0);
    assert_eq!(
        controller.sink().commands(),
        vec![
            OutboundCommand::SetRightArmOffset { offset: -12.0 },
            OutboundCommand::SetAnimationVerticalOffset { offset: 3.0 },
            OutboundCommand::SetCatSize { size: 150 },
        ]
    );
    assert_eq!(stored(&controller, "openBongoCatSize").as_deref(), Some("150"));
}

#[test]
fn size_scoped_slider_writes_only_the_composite_key() {
    let mut controller = controller_with(&[("openBongoCatSize", "75")]);
    controller.bootstrap();
    controller.dispatch(UiAction::SetRightArmOffset(20.0));

    assert_eq!(
        stored(&controller, "openBongo_rightArmOffset_size_75").as_deref(),
        Some("20")
    );
    assert_eq!(stored(&controller, RIGHT_ARM_OFFSET.key), None);

    controller.dispatch(UiAction::SetCatSize(100));
    assert_eq!(controller.state().right_arm_offset, 0.0);
    controller.dispatch(UiAction::SetCatSize(75));
    assert_eq!(controller.state().right_arm_offset, 20.0);
}

#[test]
fn backend_messages_update_state_but_never_storage() {
    let mut controller = controller_with(&[]);
    assert!(controller.receive_message(r#"{"type":"catSize","data":{"size":150}}"#));
    assert!(controller.receive_message(json!({"type":"sfxVolume","data":{"volume":10}})));
    assert_eq!(controller.state().cat_size, 150);
    assert_eq!(controller.state().sfx_volume, 10);
    assert_eq!(stored(&controller, "openBongoCatSize"), None);
    assert_eq!(stored(&controller, "openBongoSFXVolume"), None);
    assert!(controller.sink().sent().is_empty());
}

#[test]
fn rejected_messages_leave_state_untouched() {
    let mut controller = controller_with(&[]);
    let before = controller.state().clone();
    for raw in [
        "{not json",
        "[1,2,3]",
        r#"{"data":{}}"#,
        r#"{"type":"somethingNew"}"#,
        r#"{"type":"catSize","data":{"size":49}}"#,
        r#"{"type":"catSize","data":{"size":201}}"#,
        r#"{"type":"selectedHat","data":{"name":""}}"#,
    ] {
        assert!(!controller.receive_message(raw), "{raw} should be dropped");
    }
    assert_eq!(controller.state(), &before);
}

#[test]
fn optimistic_selection_is_reconciled_by_the_backend() {
    let mut controller = controller_with(&[]);
    controller.receive_message(json!({
        "type": "catPackList",
        "data": [{"name": "Classic", "iconPath": "cats/classic.png"}, {"name": "Tabby", "iconPath": "cats/tabby.png"}]
    }));
    controller.dispatch(UiAction::SelectItem {
        kind: CatalogKind::CatPacks,
        name: "Tabby".into(),
    });
    assert_eq!(controller.state().cat_packs.selected, "Tabby");

    controller.receive_message(r#"{"type":"selectedCatPack","data":{"name":"Classic"}}"#);
    assert_eq!(controller.state().cat_packs.selected, "Classic");
    assert!(controller.state().cat_packs.rows[0].selected);
    assert!(!controller.state().cat_packs.rows[1].selected);
}

#[test]
fn icon_requests_are_collected_once_per_source() {
    let mut controller = controller_with(&[]);
    controller.receive_message(json!({
        "type": "bonkPackList",
        "data": [{"name": "Classic", "iconPath": "a.png"}, {"name": "Twin", "iconPath": "a.png"}]
    }));
    let rows: Vec<&str> = controller
        .state()
        .bonk_packs
        .rows
        .iter()
        .map(|row| row.name.as_str())
        .collect();
    assert_eq!(rows, vec!["No SFX", "Classic", "Twin"]);
    assert_eq!(controller.take_icon_requests(), vec!["a.png".to_string()]);
    assert!(controller.take_icon_requests().is_empty());
}

#[test]
fn storage_failures_do_not_stop_the_panel() {
    let mut controller = PanelController::new(MemoryStore::disabled(), RecordingSink::new());
    controller.bootstrap();
    controller.dispatch(UiAction::SetDarkMode(true));
    controller.dispatch(UiAction::SetSfxVolume(20));
    assert!(controller.state().dark_mode);
    assert_eq!(controller.state().sfx_volume, 20);
    assert_eq!(
        controller.sink().commands().last(),
        Some(&OutboundCommand::SetSfxVolume { volume: 20 })
    );
}

#[test]
fn toggling_particles_requests_a_stop_then_a_restart() {
    let mut controller = controller_with(&[]);
    controller.dispatch(UiAction::SetParticleEffects(false));
    assert_eq!(controller.take_particle_request(), Some(ParticleRequest::Stop));
    assert_eq!(stored(&controller, "openBongoParticleEffects").as_deref(), Some("false"));
    controller.dispatch(UiAction::SetParticleEffects(true));
    assert_eq!(controller.take_particle_request(), Some(ParticleRequest::Restart));
}
