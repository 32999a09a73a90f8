//! Integration tests for the radio settings core
//!
//! These tests run the settings actor against a virtual modem and verify:
//! - The initialization query pipeline and one-shot caching
//! - Write atomicity: commit on success, rollback on driver failure
//! - Strict request ordering through the actor queue
//! - Legacy word mapping and unsupported-value rejection
//! - Stored-preference stickiness across the first read
//! - Change notification and persistence discipline

use rat_settings::{
    run_settings_actor, MemoryStore, Properties, PropertyValue, Settings, SettingsError,
    SettingsEvent, SettingsHandle, SettingsRequest, StoredSettings,
};
use rat_settings::events::names;
use rat_sim::{CallJournal, DriverCall, VirtualModem, VirtualModemConfig};
use rat_types::TechSet;
use tokio::sync::mpsc;

// ============================================================================
// Helper Functions
// ============================================================================

mod helpers {
    use super::*;

    /// A settings actor wired to a virtual modem
    pub struct Harness {
        pub handle: SettingsHandle,
        pub journal: CallJournal,
        pub store: MemoryStore,
        pub events: mpsc::Receiver<SettingsEvent>,
    }

    /// Spawn the modem and the settings actor for a config and store
    pub fn start(config: VirtualModemConfig, store: MemoryStore) -> Harness {
        let (driver, journal) = VirtualModem::spawn(config);
        let (event_tx, events) = mpsc::channel(64);
        let handle = Settings::new(driver, Box::new(store.clone()), event_tx).spawn();
        Harness {
            handle,
            journal,
            store,
            events,
        }
    }

    /// Start a harness and complete the first read, so the attach push and
    /// query pipeline are out of the way; clears the journal and events
    pub async fn primed(config: VirtualModemConfig, store: MemoryStore) -> Harness {
        let mut harness = start(config, store);
        harness.handle.get_properties().await.unwrap();
        harness.journal.clear();
        drain(&mut harness.events);
        harness
    }

    /// Read the current property snapshot
    pub async fn props(harness: &Harness) -> Properties {
        harness.handle.get_properties().await.unwrap()
    }

    /// Write the technology preference
    pub async fn set_pref(harness: &Harness, value: &str) -> Result<(), SettingsError> {
        harness
            .handle
            .set_property(names::TECHNOLOGY_PREFERENCE, PropertyValue::Text(value.into()))
            .await
    }

    /// Collect all queued events without blocking
    pub fn drain(events: &mut mpsc::Receiver<SettingsEvent>) -> Vec<SettingsEvent> {
        let mut out = Vec::new();
        while let Ok(event) = events.try_recv() {
            out.push(event);
        }
        out
    }

    /// Extract the technology preference masks pushed to the modem, in order
    pub fn rat_mode_pushes(journal: &CallJournal) -> Vec<u32> {
        journal
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                DriverCall::SetRatMode(mode) => Some(mode.bits()),
                _ => None,
            })
            .collect()
    }

    /// Count journal entries matching a predicate
    pub fn count(journal: &CallJournal, pred: impl Fn(&DriverCall) -> bool) -> usize {
        journal.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn sets(bits: &[u32]) -> Vec<TechSet> {
        bits.iter().copied().map(TechSet::from_bits).collect()
    }
}

// ============================================================================
// Pipeline and Caching Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn first_read_queries_modem_once() {
        let config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        let harness = helpers::start(config, MemoryStore::new());

        for _ in 0..3 {
            helpers::props(&harness).await;
        }

        // One pipeline run serves every later read
        assert_eq!(
            helpers::count(&harness.journal, |c| *c == DriverCall::QueryRatMode),
            1
        );
        assert_eq!(
            helpers::count(&harness.journal, |c| *c == DriverCall::QueryAvailableRatModes),
            1
        );
        assert_eq!(
            helpers::count(&harness.journal, |c| *c == DriverCall::QueryBand),
            1
        );
    }

    #[tokio::test]
    async fn failed_stage_keeps_loaded_value() {
        let mut config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        config.failures.query_band = true;
        let store = MemoryStore::with_settings(StoredSettings {
            technology_preference: "any".into(),
            gsm_band: 4,
            umts_band: 0,
        });
        let harness = helpers::start(config, store);

        let props = helpers::props(&harness).await;

        // The band query failed; the stored restriction survives
        assert_eq!(props.gsm_band.as_deref(), Some("1800"));

        // A failed stage does not defeat caching
        helpers::props(&harness).await;
        assert_eq!(
            helpers::count(&harness.journal, |c| *c == DriverCall::QueryBand),
            1
        );
    }

    #[tokio::test]
    async fn legacy_driver_enumerates_single_technologies() {
        let harness = helpers::start(VirtualModemConfig::legacy(0b011), MemoryStore::new());

        let props = helpers::props(&harness).await;
        assert_eq!(
            props.available_technologies,
            Some(vec!["gsm".into(), "umts".into()])
        );
    }

    #[tokio::test]
    async fn modern_driver_enumerates_words_and_combinations() {
        let config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        let harness = helpers::start(config, MemoryStore::new());

        let props = helpers::props(&harness).await;
        assert_eq!(
            props.available_technologies,
            Some(vec![
                "gsm".into(),
                "umts".into(),
                "lte".into(),
                "+gsm".into(),
                "+umts+gsm".into(),
                "+lte+umts+gsm".into(),
            ])
        );
    }

    #[tokio::test]
    async fn minimal_driver_exposes_only_the_preference() {
        let harness = helpers::start(VirtualModemConfig::rat_mode_only(), MemoryStore::new());

        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "any");
        assert_eq!(props.gsm_band, None);
        assert_eq!(props.umts_band, None);
        assert_eq!(props.fast_dormancy, None);
        assert_eq!(props.available_technologies, None);
    }
}

// ============================================================================
// Stickiness Tests
// ============================================================================

mod stickiness_tests {
    use super::*;

    /// A modem whose preference cannot be pushed at attach, so the first
    /// read sees whatever mode the modem booted in
    fn read_only_pref(supported: &[u32], boot_mode: u32) -> VirtualModemConfig {
        let mut config = VirtualModemConfig::modern(&helpers::sets(supported));
        config.caps.set_rat_mode = false;
        config.mode = TechSet::from_bits(boot_mode);
        config
    }

    #[tokio::test]
    async fn stored_legacy_word_sticks_when_it_still_maps() {
        let store = MemoryStore::with_settings(StoredSettings {
            technology_preference: "gsm".into(),
            gsm_band: 0,
            umts_band: 0,
        });
        // gsm maps to mask 1 on this modem, and the modem reports 1
        let harness = helpers::start(read_only_pref(&[1, 3, 7], 1), store);

        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "gsm");
    }

    #[tokio::test]
    async fn stored_legacy_word_yields_to_a_different_report() {
        let store = MemoryStore::with_settings(StoredSettings {
            technology_preference: "gsm".into(),
            gsm_band: 0,
            umts_band: 0,
        });
        // The modem reports mask 3, which gsm does not map to
        let harness = helpers::start(read_only_pref(&[1, 3, 7], 3), store);

        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "+umts+gsm");

        // The displaced preference is persisted in the new form
        assert_eq!(
            harness.store.contents().unwrap().technology_preference,
            "+umts+gsm"
        );
    }
}

// ============================================================================
// Write Discipline Tests
// ============================================================================

mod write_tests {
    use super::*;

    #[tokio::test]
    async fn successful_write_commits_notifies_and_persists() {
        let mut harness =
            helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        helpers::set_pref(&harness, "lte").await.unwrap();

        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "lte");

        let events = helpers::drain(&mut harness.events);
        assert_eq!(
            events,
            vec![SettingsEvent::PropertyChanged {
                name: names::TECHNOLOGY_PREFERENCE,
                value: PropertyValue::Text("lte".into()),
            }]
        );
        assert_eq!(
            harness.store.contents().unwrap().technology_preference,
            "lte"
        );
    }

    #[tokio::test]
    async fn writing_the_current_value_skips_the_modem() {
        let harness = helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        // Already "any" after load
        helpers::set_pref(&harness, "any").await.unwrap();
        harness
            .handle
            .set_property(names::GSM_BAND, PropertyValue::Text("any".into()))
            .await
            .unwrap();

        assert!(harness.journal.is_empty());
    }

    #[tokio::test]
    async fn failed_preference_write_rolls_back() {
        let mut config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        config.failures.set_rat_mode = true;
        let mut harness = helpers::primed(config, MemoryStore::new()).await;

        let saves_before = harness.store.save_count();
        let result = helpers::set_pref(&harness, "lte").await;
        assert!(matches!(result, Err(SettingsError::Driver(_))));

        // Nothing observable changed: no event, no save, old value intact
        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "any");
        assert!(helpers::drain(&mut harness.events).is_empty());
        assert_eq!(harness.store.save_count(), saves_before);
    }

    #[tokio::test]
    async fn failed_band_write_rolls_back() {
        let mut config = VirtualModemConfig::legacy(0b111);
        config.failures.set_band = true;
        let mut harness = helpers::primed(config, MemoryStore::new()).await;

        let result = harness
            .handle
            .set_property(names::GSM_BAND, PropertyValue::Text("850".into()))
            .await;
        assert!(matches!(result, Err(SettingsError::Driver(_))));

        let props = helpers::props(&harness).await;
        assert_eq!(props.gsm_band.as_deref(), Some("any"));
        assert!(helpers::drain(&mut harness.events).is_empty());
    }

    #[tokio::test]
    async fn fast_dormancy_toggles_and_notifies_once() {
        let config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        let mut harness = helpers::primed(config, MemoryStore::new()).await;

        harness
            .handle
            .set_property(names::FAST_DORMANCY, PropertyValue::Bool(true))
            .await
            .unwrap();
        // Second write of the same value is a no-op
        harness
            .handle
            .set_property(names::FAST_DORMANCY, PropertyValue::Bool(true))
            .await
            .unwrap();

        let events = helpers::drain(&mut harness.events);
        assert_eq!(
            events,
            vec![SettingsEvent::PropertyChanged {
                name: names::FAST_DORMANCY,
                value: PropertyValue::Bool(true),
            }]
        );
        assert_eq!(
            helpers::count(&harness.journal, |c| matches!(
                c,
                DriverCall::SetFastDormancy(_)
            )),
            1
        );
    }

    #[tokio::test]
    async fn unknown_property_is_rejected() {
        let harness = helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        let result = harness
            .handle
            .set_property("Volume", PropertyValue::Text("11".into()))
            .await;
        assert!(matches!(result, Err(SettingsError::InvalidProperty(_))));
    }
}

// ============================================================================
// Validation and Mapping Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[tokio::test]
    async fn legacy_driver_rejects_unsupported_technology() {
        // Modem supports gsm and umts only
        let harness = helpers::primed(VirtualModemConfig::legacy(0b011), MemoryStore::new()).await;

        let result = helpers::set_pref(&harness, "lte").await;
        assert!(matches!(result, Err(SettingsError::UnsupportedValue(_))));

        // Rejected before reaching the modem
        assert!(harness.journal.is_empty());
    }

    #[tokio::test]
    async fn legacy_driver_rejects_combinations() {
        let harness = helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        let result = helpers::set_pref(&harness, "+umts+gsm").await;
        assert!(matches!(result, Err(SettingsError::UnsupportedValue(_))));
        assert!(harness.journal.is_empty());
    }

    #[tokio::test]
    async fn modern_driver_maps_legacy_word_to_mask() {
        let config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        let harness = helpers::primed(config, MemoryStore::new()).await;

        helpers::set_pref(&harness, "lte").await.unwrap();

        // lte maps to the widest supported mask containing it
        assert_eq!(helpers::rat_mode_pushes(&harness.journal), vec![7]);

        // The legacy word stays visible, not the mask
        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "lte");
    }

    #[tokio::test]
    async fn modern_driver_rejects_unmappable_word() {
        // No gsm-only mode on this modem
        let config = VirtualModemConfig::modern(&helpers::sets(&[2, 3]));
        let harness = helpers::primed(config, MemoryStore::new()).await;

        let result = helpers::set_pref(&harness, "gsm").await;
        assert!(matches!(result, Err(SettingsError::UnsupportedValue(_))));
        assert!(harness.journal.is_empty());
    }

    #[tokio::test]
    async fn modern_driver_rejects_unsupported_combination() {
        let config = VirtualModemConfig::modern(&helpers::sets(&[1, 3, 7]));
        let harness = helpers::primed(config, MemoryStore::new()).await;

        let result = helpers::set_pref(&harness, "+lte+umts").await;
        assert!(matches!(result, Err(SettingsError::UnsupportedValue(_))));
        assert!(harness.journal.is_empty());
    }

    #[tokio::test]
    async fn malformed_value_is_rejected() {
        let harness = helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        let result = helpers::set_pref(&harness, "5g-ultra").await;
        assert!(matches!(result, Err(SettingsError::InvalidValue(_))));
    }

    #[tokio::test]
    async fn minimal_driver_rejects_band_writes() {
        let harness = helpers::primed(VirtualModemConfig::rat_mode_only(), MemoryStore::new()).await;

        let result = harness
            .handle
            .set_property(names::UMTS_BAND, PropertyValue::Text("2100".into()))
            .await;
        assert_eq!(result, Err(SettingsError::NotSupported));
    }
}

// ============================================================================
// Ordering Tests
// ============================================================================

mod ordering_tests {
    use super::*;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn queued_writes_reach_the_modem_in_request_order() {
        let (driver, journal) = VirtualModem::spawn(VirtualModemConfig::legacy(0b111));
        let (event_tx, _events) = mpsc::channel(64);
        let settings = Settings::new(driver, Box::new(MemoryStore::new()), event_tx);

        let (tx, rx) = mpsc::channel(8);
        tokio::spawn(run_settings_actor(settings, rx));

        // Queue three writes before any of them is serviced
        let mut replies = Vec::new();
        for word in ["gsm", "umts", "lte"] {
            let (reply, reply_rx) = oneshot::channel();
            tx.send(SettingsRequest::SetProperty {
                name: names::TECHNOLOGY_PREFERENCE.to_string(),
                value: PropertyValue::Text(word.into()),
                reply,
            })
            .await
            .unwrap();
            replies.push(reply_rx);
        }
        for reply_rx in replies {
            reply_rx.await.unwrap().unwrap();
        }

        // First push is the attach-time wildcard, then the queued writes
        assert_eq!(helpers::rat_mode_pushes(&journal), vec![0, 1, 2, 4]);
    }

    #[tokio::test]
    async fn reads_queued_behind_a_write_see_its_result() {
        let harness = helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        helpers::set_pref(&harness, "umts").await.unwrap();
        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "umts");
    }
}

// ============================================================================
// Storage Tests
// ============================================================================

mod storage_tests {
    use super::*;

    #[tokio::test]
    async fn integer_preference_migrates_on_load() {
        let store = MemoryStore::with_settings(StoredSettings {
            technology_preference: "2".into(),
            gsm_band: 1,
            umts_band: 0,
        });
        let harness = helpers::start(VirtualModemConfig::legacy(0b111), store);

        // Rewritten in the word form at load time, bands preserved
        let rewritten = harness.store.contents().unwrap();
        assert_eq!(rewritten.technology_preference, "umts");
        assert_eq!(rewritten.gsm_band, 1);

        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "umts");
        assert_eq!(props.gsm_band.as_deref(), Some("850"));
    }

    #[tokio::test]
    async fn loaded_settings_are_pushed_at_attach() {
        let store = MemoryStore::with_settings(StoredSettings {
            technology_preference: "umts".into(),
            gsm_band: 0,
            umts_band: 5,
        });
        let harness = helpers::start(VirtualModemConfig::legacy(0b111), store);
        helpers::props(&harness).await;

        let calls = harness.journal.calls();
        assert!(calls.contains(&DriverCall::SetBand(
            rat_types::GsmBand::Any,
            rat_types::UmtsBand::B2100,
        )));
        assert!(calls.contains(&DriverCall::SetRatMode(TechSet::from_bits(2))));
    }

    #[tokio::test]
    async fn failed_attach_push_does_not_block_readiness() {
        let store = MemoryStore::with_settings(StoredSettings {
            technology_preference: "umts".into(),
            gsm_band: 0,
            umts_band: 0,
        });
        let mut config = VirtualModemConfig::legacy(0b111);
        config.failures.set_rat_mode = true;
        config.failures.set_band = true;
        let harness = helpers::start(config, store);

        // The push failed, but the actor comes up and answers reads; the
        // preference resyncs from what the modem actually reports
        let props = helpers::props(&harness).await;
        assert_eq!(props.technology_preference, "any");
    }

    #[tokio::test]
    async fn committed_band_write_is_persisted() {
        let harness = helpers::primed(VirtualModemConfig::legacy(0b111), MemoryStore::new()).await;

        harness
            .handle
            .set_property(names::GSM_BAND, PropertyValue::Text("900E".into()))
            .await
            .unwrap();

        assert_eq!(harness.store.contents().unwrap().gsm_band, 3);
    }
}
