use super::*;

fn items(names: &[&str]) -> Vec<CatalogItem> {
    names
        .iter()
        .map(|name| CatalogItem::new(*name, format!("icons/{name}.png")))
        .collect()
}

fn sends(effects: &[PanelEffect]) -> Vec<OutboundCommand> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            PanelEffect::Send(command) => Some(command.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn switching_to_a_catalog_tab_requests_its_list_and_rearms_animation() {
    let mut state = PanelState::default();
    state.hats.animated = true;

    let effects = reduce(&mut state, UiAction::SwitchTab(Tab::Hats));
    assert_eq!(state.current_tab, Tab::Hats);
    assert!(!state.hats.animated);
    assert_eq!(sends(&effects), vec![OutboundCommand::GetHats]);

    let effects = reduce(&mut state, UiAction::SwitchTab(Tab::Settings));
    assert_eq!(state.current_tab, Tab::Settings);
    assert!(effects.is_empty());
}

#[test]
fn first_list_after_tab_switch_staggers_then_later_lists_do_not() {
    let mut state = PanelState::default();
    let effects = apply_inbound(&mut state, InboundMessage::CatPackList(items(&["Classic", "Tabby"])));

    let delays: Vec<Option<f32>> = state.cat_packs.rows.iter().map(|r| r.entrance_delay).collect();
    assert_eq!(delays.len(), 2);
    assert!((delays[0].unwrap_or_default() - 0.1).abs() < 1e-6);
    assert!((delays[1].unwrap_or_default() - 0.15).abs() < 1e-6);
    assert!(state.cat_packs.animated);
    assert_eq!(
        effects,
        vec![
            PanelEffect::LoadIcon { source: "icons/Classic.png".into() },
            PanelEffect::LoadIcon { source: "icons/Tabby.png".into() },
        ]
    );

    apply_inbound(&mut state, InboundMessage::CatPackList(items(&["Classic"])));
    assert_eq!(state.cat_packs.rows[0].entrance_delay, None);
    assert_eq!(state.cat_packs.generation, 2);
}

#[test]
fn empty_list_leaves_animation_flag_alone() {
    let mut state = PanelState::default();
    let effects = apply_inbound(&mut state, InboundMessage::HatList(Vec::new()));
    assert!(effects.is_empty());
    assert!(state.hats.rows.is_empty());
    assert!(!state.hats.animated);
}

#[test]
fn bonk_list_always_starts_with_no_sfx() {
    let mut state = PanelState::default();
    apply_inbound(
        &mut state,
        InboundMessage::BonkPackList(vec![
            CatalogItem::new("Boing", "sfx/boing.png"),
            CatalogItem::new(NO_SFX_NAME, ""),
        ]),
    );
    let rows = &state.bonk_packs.rows;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].name, NO_SFX_NAME);
    assert_eq!(rows[0].icon, RowIcon::Muted);
    assert_eq!(rows[2].icon, RowIcon::Missing);

    apply_inbound(&mut state, InboundMessage::BonkPackList(Vec::new()));
    assert_eq!(state.bonk_packs.rows.len(), 1);
}

#[test]
fn selection_updates_rows_in_place() {
    let mut state = PanelState::default();
    apply_inbound(&mut state, InboundMessage::HatList(items(&["Beanie", "Crown"])));
    let generation = state.hats.generation;

    apply_inbound(&mut state, InboundMessage::SelectedHat { name: "Crown".into() });
    assert_eq!(state.hats.generation, generation);
    assert!(!state.hats.rows[0].selected);
    assert!(state.hats.rows[1].selected);

    let effects = reduce(
        &mut state,
        UiAction::SelectItem { kind: CatalogKind::Hats, name: "Beanie".into() },
    );
    assert!(state.hats.rows[0].selected);
    assert!(!state.hats.rows[1].selected);
    assert_eq!(
        sends(&effects),
        vec![OutboundCommand::SelectHat { name: "Beanie".into() }]
    );
}

#[test]
fn selection_survives_a_list_refresh() {
    let mut state = PanelState::default();
    apply_inbound(&mut state, InboundMessage::SelectedCatPack { name: "Tabby".into() });
    apply_inbound(&mut state, InboundMessage::CatPackList(items(&["Classic", "Tabby"])));
    assert!(state.cat_packs.rows[1].selected);
}

#[test]
fn nameless_rows_cannot_be_selected() {
    let mut state = PanelState::default();
    let effects = reduce(
        &mut state,
        UiAction::SelectItem { kind: CatalogKind::CatPacks, name: String::new() },
    );
    assert!(effects.is_empty());
}

#[test]
fn size_change_loads_offsets_before_sending_and_saving() {
    let mut state = PanelState::default();
    let effects = reduce(&mut state, UiAction::SetCatSize(150));
    assert_eq!(state.cat_size, 150);
    assert_eq!(
        effects,
        vec![
            PanelEffect::LoadSizeScopedOffsets { size: 150 },
            PanelEffect::Send(OutboundCommand::SetCatSize { size: 150 }),
            PanelEffect::Persist(PreferenceWrite::CatSize(150)),
        ]
    );

    assert!(reduce(&mut state, UiAction::SetCatSize(500)).is_empty());
    assert_eq!(state.cat_size, 150);
}

#[test]
fn size_scoped_offsets_persist_under_current_size() {
    let mut state = PanelState::default();
    state.cat_size = 75;
    let effects = reduce(&mut state, UiAction::SetRightArmOffset(12.5));
    assert_eq!(
        effects,
        vec![
            PanelEffect::Send(OutboundCommand::SetRightArmOffset { offset: 12.5 }),
            PanelEffect::Persist(PreferenceWrite::SizeScoped {
                setting: SizeScopedSetting::RightArmOffset,
                size: 75,
                value: 12.5,
            }),
        ]
    );

    let effects = reduce(&mut state, UiAction::SetAnimationVerticalOffset(-30.0));
    assert_eq!(state.animation_vertical_offset, -30.0);
    assert!(matches!(
        effects[1],
        PanelEffect::Persist(PreferenceWrite::SizeScoped {
            setting: SizeScopedSetting::AnimationVerticalOffset,
            size: 75,
            ..
        })
    ));
}

#[test]
fn accent_color_is_saved_before_it_is_sent() {
    let mut state = PanelState::default();
    let effects = reduce(&mut state, UiAction::SetAccentColor("#ff8800".into()));
    assert_eq!(state.accent_color, "#ff8800");
    assert_eq!(
        effects,
        vec![
            PanelEffect::Persist(PreferenceWrite::AccentColor("#ff8800".into())),
            PanelEffect::Send(OutboundCommand::SetAccentColor { color: "#ff8800".into() }),
        ]
    );
}

#[test]
fn dark_mode_stays_local() {
    let mut state = PanelState::default();
    let effects = reduce(&mut state, UiAction::SetDarkMode(true));
    assert!(state.dark_mode);
    assert_eq!(effects, vec![PanelEffect::Persist(PreferenceWrite::DarkMode(true))]);
}

#[test]
fn particle_toggle_and_density_drive_the_effects_layer() {
    let mut state = PanelState::default();
    let effects = reduce(&mut state, UiAction::SetParticleEffects(false));
    assert_eq!(effects[1], PanelEffect::StopParticles);

    let effects = reduce(&mut state, UiAction::SetParticleDensity(150));
    assert_eq!(state.particle_density, 150);
    assert_eq!(effects, vec![PanelEffect::Persist(PreferenceWrite::ParticleDensity(150))]);

    let effects = reduce(&mut state, UiAction::SetParticleEffects(true));
    assert_eq!(effects[1], PanelEffect::RestartParticles);
    let effects = reduce(&mut state, UiAction::SetParticleDensity(50));
    assert_eq!(effects.last(), Some(&PanelEffect::RestartParticles));

    assert!(reduce(&mut state, UiAction::SetParticleDensity(0)).is_empty());
}

#[test]
fn out_of_range_sliders_are_ignored() {
    let mut state = PanelState::default();
    assert!(reduce(&mut state, UiAction::SetUiOffset(51)).is_empty());
    assert!(reduce(&mut state, UiAction::SetSfxVolume(101)).is_empty());
    assert!(reduce(&mut state, UiAction::SetLeftArmOffset(f64::NAN)).is_empty());
    assert_eq!(state, PanelState::default());
}

#[test]
fn opening_a_link_hides_the_window_shortly_after() {
    let mut state = PanelState::default();
    let effects = reduce(&mut state, UiAction::OpenLink(ExternalLink::Discord));
    assert_eq!(
        effects,
        vec![
            PanelEffect::Send(OutboundCommand::OpenUrl { url: shared::domain::DISCORD_URL.into() }),
            PanelEffect::SendAfter {
                command: OutboundCommand::HideWindow,
                delay: LINK_HIDE_DELAY,
            },
        ]
    );
}

#[test]
fn inbound_values_are_mirrored_without_persisting() {
    let mut state = PanelState::default();
    let messages = vec![
        InboundMessage::CatSize(125),
        InboundMessage::AccentColor("#123456".into()),
        InboundMessage::UiOffset(-5),
        InboundMessage::UiHorizontalOffset(7),
        InboundMessage::SfxVolume(40),
        InboundMessage::CatFlip(true),
        InboundMessage::LeftArmOffset(2.5),
        InboundMessage::RightArmOffset(-3.0),
        InboundMessage::AnimationVerticalOffset(10.0),
    ];
    for message in messages {
        assert!(apply_inbound(&mut state, message).is_empty());
    }
    assert_eq!(state.cat_size, 125);
    assert_eq!(state.accent_color, "#123456");
    assert_eq!((state.ui_offset, state.ui_horizontal_offset), (-5, 7));
    assert_eq!(state.sfx_volume, 40);
    assert!(state.cat_flipped);
    assert_eq!(state.left_arm_offset, 2.5);
    assert_eq!(state.right_arm_offset, -3.0);
    assert_eq!(state.animation_vertical_offset, 10.0);
}

#[test]
fn restart_notice_shows_until_dismissed() {
    let mut state = PanelState::default();
    apply_inbound(&mut state, InboundMessage::RestartRequired { message: "Restart now".into() });
    assert_eq!(state.restart_notice.as_deref(), Some("Restart now"));
    reduce(&mut state, UiAction::DismissRestartNotice);
    assert_eq!(state.restart_notice, None);
}
