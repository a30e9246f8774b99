//! # Fleet topology: the index→name bijection and tier membership.
//!
//! Process identity on the control network is purely positional: process `n`
//! of a fleet with prefix `P` is named `P-NN` (1-based, zero-padded to width
//! 2, widening naturally from 100 up). [`Topology`] materializes that mapping
//! once, validates it against the configured server name, and precomputes the
//! batches the sequencer presses:
//!
//! - the **data tier**: every numbered process except the server, in index
//!   order;
//! - the **server**, sequenced on its own between the two delays;
//! - the **ioc**, the dependent control-system process started last;
//! - the **full set** (data + server + ioc) used by stop and toggle batches.
//!
//! ## Rules
//! - `process_count` must be ≥ 1.
//! - `server_process_name` must equal exactly one generated name; it is
//!   removed from the data tier exactly once. Anything else is a
//!   [`ConfigError`] at construction, before any remote call.

use crate::core::config::SequencerConfig;
use crate::error::ConfigError;

/// Validated fleet membership, resolved once at construction.
#[derive(Clone, Debug)]
pub struct Topology {
    data: Vec<String>,
    server: String,
    ioc: String,
    full: Vec<String>,
}

impl Topology {
    /// Resolves and validates the topology described by `cfg`.
    pub fn resolve(cfg: &SequencerConfig) -> Result<Self, ConfigError> {
        if cfg.process_count < 1 {
            return Err(ConfigError::EmptyFleet {
                count: cfg.process_count,
            });
        }

        let mut data: Vec<String> = (1..=cfg.process_count)
            .map(|index| Self::process_name(&cfg.prefix, index))
            .collect();

        // Generated names are distinct by construction, so this removes the
        // server exactly once.
        match data.iter().position(|name| *name == cfg.server_process_name) {
            Some(index) => {
                data.remove(index);
            }
            None => {
                return Err(ConfigError::ServerNotInFleet {
                    server: cfg.server_process_name.clone(),
                    prefix: cfg.prefix.clone(),
                    count: cfg.process_count,
                });
            }
        }

        let server = cfg.server_process_name.clone();
        let ioc = cfg.ioc_name.clone();

        let mut full = data.clone();
        full.push(server.clone());
        full.push(ioc.clone());

        Ok(Self {
            data,
            server,
            ioc,
            full,
        })
    }

    /// Formats the name of process `index` (1-based) under `prefix`.
    ///
    /// The prefix is normalized to end with a `-` separator before the
    /// zero-padded index is appended, so `"X"` and `"X-"` produce the same
    /// names.
    ///
    /// # Example
    /// ```
    /// use procvisor::Topology;
    ///
    /// assert_eq!(Topology::process_name("X", 1), "X-01");
    /// assert_eq!(Topology::process_name("X-", 1), "X-01");
    /// assert_eq!(Topology::process_name("X", 100), "X-100");
    /// ```
    pub fn process_name(prefix: &str, index: usize) -> String {
        if prefix.ends_with('-') {
            format!("{prefix}{index:02}")
        } else {
            format!("{prefix}-{index:02}")
        }
    }

    /// The ordered data tier (numbered processes minus the server).
    pub fn data_processes(&self) -> &[String] {
        &self.data
    }

    /// The front-end server process name.
    pub fn server(&self) -> &str {
        &self.server
    }

    /// The dependent control-system process name.
    pub fn ioc(&self) -> &str {
        &self.ioc
    }

    /// Every controlled process: data tier, then server, then ioc.
    pub fn full_set(&self) -> &[String] {
        &self.full
    }

    /// The server as a one-element batch.
    pub(crate) fn server_batch(&self) -> &[String] {
        std::slice::from_ref(&self.server)
    }

    /// The ioc as a one-element batch.
    pub(crate) fn ioc_batch(&self) -> &[String] {
        std::slice::from_ref(&self.ioc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(count: usize, server: &str) -> SequencerConfig {
        SequencerConfig::new("B-ODN", count, server, "B-IOC-01")
    }

    #[test]
    fn test_process_name_pads_to_width_two() {
        assert_eq!(Topology::process_name("X", 1), "X-01");
        assert_eq!(Topology::process_name("X", 10), "X-10");
        assert_eq!(Topology::process_name("X", 100), "X-100");
    }

    #[test]
    fn test_process_name_trailing_separator_is_idempotent() {
        assert_eq!(
            Topology::process_name("B-ODN", 7),
            Topology::process_name("B-ODN-", 7),
        );
    }

    #[test]
    fn test_data_tier_excludes_server_and_keeps_order() {
        let topo = Topology::resolve(&config(11, "B-ODN-01")).unwrap();

        let expected: Vec<String> = (2..=11).map(|i| format!("B-ODN-{i:02}")).collect();
        assert_eq!(topo.data_processes(), expected.as_slice());
        assert!(!topo.data_processes().contains(&"B-ODN-01".to_string()));
    }

    #[test]
    fn test_data_tier_len_is_count_minus_one() {
        for count in 1..=20 {
            let server = Topology::process_name("B-ODN", count);
            let topo = Topology::resolve(&config(count, &server)).unwrap();
            assert_eq!(
                topo.data_processes().len(),
                count - 1,
                "count={count} server={server}"
            );
        }
    }

    #[test]
    fn test_full_set_is_data_then_server_then_ioc() {
        let topo = Topology::resolve(&config(3, "B-ODN-02")).unwrap();
        assert_eq!(
            topo.full_set(),
            ["B-ODN-01", "B-ODN-03", "B-ODN-02", "B-IOC-01"]
        );
    }

    #[test]
    fn test_single_process_fleet_has_empty_data_tier() {
        let topo = Topology::resolve(&config(1, "B-ODN-01")).unwrap();
        assert!(topo.data_processes().is_empty());
        assert_eq!(topo.full_set(), ["B-ODN-01", "B-IOC-01"]);
    }

    #[test]
    fn test_unknown_server_fails_construction() {
        let err = Topology::resolve(&config(3, "B-ODN-99")).unwrap_err();
        assert_eq!(err.as_label(), "config_server_not_in_fleet");
    }

    #[test]
    fn test_zero_count_fails_construction() {
        let err = Topology::resolve(&config(0, "B-ODN-01")).unwrap_err();
        assert_eq!(err.as_label(), "config_empty_fleet");
    }
}
