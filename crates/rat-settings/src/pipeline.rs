//! Initialization query pipeline
//!
//! On first access the settings are synchronized from the modem through a
//! linear chain of queries: technology preference, bands, fast dormancy,
//! then the supported-technology set. Each stage is skipped when the driver
//! lacks the capability, and a stage failure is logged and tolerated — the
//! field keeps its prior value and the chain continues. The pipeline runs
//! at most once per settings instance; afterwards reads are answered from
//! the cached state.

use rat_types::{AccessMode, TechSet};
use tracing::{debug, warn};

use crate::engine::Settings;

impl Settings {
    /// Run the query chain and mark the state cached
    pub(crate) async fn run_query_pipeline(&mut self) {
        debug!("running settings query pipeline");

        self.query_rat_mode_stage().await;
        self.query_band_stage().await;
        self.query_fast_dormancy_stage().await;
        self.query_available_rats_stage().await;

        self.state_mut().cached = true;
    }

    async fn query_rat_mode_stage(&mut self) {
        if !self.driver().caps().query_rat_mode {
            return;
        }

        let reported = match self.driver().query_rat_mode().await {
            Ok(reported) => reported,
            Err(e) => {
                warn!("technology preference query failed: {}", e);
                return;
            }
        };

        let mode = if self.driver().is_legacy() {
            match reported.single() {
                Some(tech) => AccessMode::Legacy(tech),
                None => AccessMode::modern(reported),
            }
        } else if matches!(self.state().mode, AccessMode::Legacy(tech)
            if self.legacy_still_maps(tech, reported))
        {
            // The previously set legacy preference still maps to what the
            // driver reports; keep the legacy word visible.
            self.state().mode
        } else {
            AccessMode::modern(reported)
        };

        self.confirm_mode(mode).await;
    }

    async fn query_band_stage(&mut self) {
        if !self.driver().caps().query_band {
            return;
        }

        match self.driver().query_band().await {
            Ok((gsm, umts)) => {
                self.state_mut().pending_band_gsm = gsm;
                self.state_mut().pending_band_umts = umts;
                self.commit_band().await;
            }
            Err(e) => warn!("band query failed: {}", e),
        }
    }

    async fn query_fast_dormancy_stage(&mut self) {
        if !self.driver().caps().query_fast_dormancy {
            return;
        }

        match self.driver().query_fast_dormancy().await {
            Ok(enable) => {
                self.state_mut().pending_fast_dormancy = enable;
                self.commit_fast_dormancy().await;
            }
            Err(e) => warn!("fast dormancy query failed: {}", e),
        }
    }

    async fn query_available_rats_stage(&mut self) {
        // Modem technology does not change; one query is enough.
        if self.state().available_modes.is_some() {
            return;
        }

        let caps = self.driver().caps();
        if caps.query_available_rat_modes {
            match self.driver().query_available_rat_modes().await {
                Ok(modes) => self.state_mut().available_modes = Some(modes),
                Err(e) => warn!("available modes query failed: {}", e),
            }
        } else if caps.query_available_rats {
            match self.driver().query_available_rats().await {
                Ok(rats) => {
                    let modes: Vec<TechSet> = TechSet::from_bits(rats).iter_lsb().collect();
                    self.state_mut().available_modes = Some(modes);
                }
                Err(e) => warn!("available technologies query failed: {}", e),
            }
        }
    }
}
