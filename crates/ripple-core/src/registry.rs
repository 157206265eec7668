//! The closed set of networks the experiments run on.
//!
//! # Overview
//!
//! Every network is described exactly once by a [`NetworkDescriptor`]:
//! the edge-list file it is read from, whether its edges are directed, the
//! name shown in reports, and the key the influence simulator writes into
//! its result files. [`Network::descriptor`] is an exhaustive `match`, so a
//! network without a descriptor does not compile; [`validate_registry`]
//! checks the remaining cross-entry invariants (unique file names and
//! result keys, report groups fully populated) and is called once at
//! startup.
//!
//! Lookups by file name or result key that miss the registry return
//! [`RippleError::UnknownNetwork`]. Callers treat this as a configuration
//! error, never as something to skip.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RippleError};

/// Canonical network identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    Amazon,
    Arxiv,
    Caida,
    DiningTable,
    Dolphins,
    Enron,
    Epinions,
    Gnutella,
    Higgs,
    HumanBrain,
    Wikipedia,
}

/// Which combined figure a network's threshold plot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportGroup {
    Small,
    Big,
}

/// Static facts about one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub network: Network,
    /// Edge-list file name inside the networks directory.
    pub file_name: &'static str,
    pub directed: bool,
    /// Name used in report tables, figures, and centrality file names.
    pub display_name: &'static str,
    /// Name the simulator writes in the `Network` column and uses as the
    /// stem of per-network threshold files.
    pub result_key: &'static str,
    /// `None` for networks that are never reported.
    pub group: Option<ReportGroup>,
}

impl Network {
    /// Every registered network, in file-name order.
    pub const ALL: [Self; 11] = [
        Self::Amazon,
        Self::Arxiv,
        Self::Caida,
        Self::DiningTable,
        Self::Dolphins,
        Self::Enron,
        Self::Epinions,
        Self::Gnutella,
        Self::Higgs,
        Self::HumanBrain,
        Self::Wikipedia,
    ];

    /// The descriptor for this network.
    #[must_use]
    pub const fn descriptor(self) -> NetworkDescriptor {
        use ReportGroup::{Big, Small};

        let (file_name, directed, display_name, result_key, group) = match self {
            Self::Amazon => ("com-amazon.ungraph.txt", false, "Amazon", "Amazon", None),
            Self::Arxiv => ("CA-GrQc.txt", false, "ArXiv", "ArXiv", Some(Small)),
            Self::Caida => ("as-caida20071105.txt", true, "Caida", "Caida", Some(Big)),
            Self::DiningTable => (
                "Dining-table_partners.txt",
                true,
                "Dining Table",
                "Dining_Table",
                Some(Small),
            ),
            Self::Dolphins => ("dolphins.txt", false, "Dolphins", "Dolphins", Some(Small)),
            Self::Enron => ("Email-Enron.txt", false, "Enron", "ENRON", Some(Big)),
            Self::Epinions => ("soc-Epinions1.txt", true, "Epinions", "Epinions", Some(Big)),
            Self::Gnutella => ("p2p-Gnutella31.txt", true, "Gnutella", "Gnutella", Some(Big)),
            Self::Higgs => ("higgs-retweet_network.txt", true, "Higgs", "Higgs", Some(Big)),
            Self::HumanBrain => (
                "budapest_connectome_3.0_209_0_median.txt",
                false,
                "Human Brain",
                "Human_Brain",
                Some(Small),
            ),
            Self::Wikipedia => ("Wiki-Vote.txt", true, "Wikipedia", "Wikipedia", Some(Small)),
        };

        NetworkDescriptor {
            network: self,
            file_name,
            directed,
            display_name,
            result_key,
            group,
        }
    }

    /// Look up a network by its edge-list file name.
    ///
    /// # Errors
    ///
    /// Returns [`RippleError::UnknownNetwork`] if no descriptor uses `file_name`.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.descriptor().file_name == file_name)
            .ok_or_else(|| RippleError::UnknownNetwork(file_name.to_string()))
    }

    /// Look up a network by the key the simulator uses in result files.
    ///
    /// # Errors
    ///
    /// Returns [`RippleError::UnknownNetwork`] if no descriptor uses `key`.
    pub fn from_result_key(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.descriptor().result_key == key)
            .ok_or_else(|| RippleError::UnknownNetwork(key.to_string()))
    }

    #[must_use]
    pub const fn is_directed(self) -> bool {
        self.descriptor().directed
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        self.descriptor().display_name
    }

    #[must_use]
    pub const fn result_key(self) -> &'static str {
        self.descriptor().result_key
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl ReportGroup {
    pub const ALL: [Self; 2] = [Self::Small, Self::Big];

    /// Networks of this group in the order they are laid out in reports.
    #[must_use]
    pub const fn networks(self) -> &'static [Network] {
        match self {
            Self::Small => &[
                Network::DiningTable,
                Network::Dolphins,
                Network::HumanBrain,
                Network::Arxiv,
                Network::Wikipedia,
            ],
            Self::Big => &[
                Network::Caida,
                Network::Enron,
                Network::Gnutella,
                Network::Epinions,
                Network::Higgs,
            ],
        }
    }

    /// Lowercase label used in output file names and captions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Big => "big",
        }
    }
}

/// Result keys of every reported network: small group first, then big.
///
/// This is the default known-network list for statistics aggregation.
#[must_use]
pub fn reported_result_keys() -> Vec<&'static str> {
    ReportGroup::ALL
        .iter()
        .flat_map(|g| g.networks().iter().map(|n| n.result_key()))
        .collect()
}

/// Check the cross-entry invariants of the registry.
///
/// # Errors
///
/// Returns [`RippleError::InvalidRegistry`] describing the first violation.
pub fn validate_registry() -> Result<()> {
    let mut files = HashSet::new();
    let mut keys = HashSet::new();

    for network in Network::ALL {
        let d = network.descriptor();
        if d.file_name.is_empty() || d.display_name.is_empty() || d.result_key.is_empty() {
            return Err(RippleError::InvalidRegistry(format!(
                "{network:?} has an empty field"
            )));
        }
        if !files.insert(d.file_name) {
            return Err(RippleError::InvalidRegistry(format!(
                "file name `{}` registered twice",
                d.file_name
            )));
        }
        if !keys.insert(d.result_key) {
            return Err(RippleError::InvalidRegistry(format!(
                "result key `{}` registered twice",
                d.result_key
            )));
        }
    }

    for group in ReportGroup::ALL {
        for network in group.networks() {
            if network.descriptor().group != Some(group) {
                return Err(RippleError::InvalidRegistry(format!(
                    "{network:?} is laid out in the {} group but not tagged with it",
                    group.label()
                )));
            }
        }
        let tagged = Network::ALL
            .iter()
            .filter(|n| n.descriptor().group == Some(group))
            .count();
        if tagged != group.networks().len() {
            return Err(RippleError::InvalidRegistry(format!(
                "{} group layout does not list every tagged network",
                group.label()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_is_valid() {
        validate_registry().expect("registry should validate");
    }

    #[test]
    fn lookup_by_file_name() {
        let n = Network::from_file_name("Wiki-Vote.txt").expect("registered");
        assert_eq!(n, Network::Wikipedia);
        assert!(n.is_directed());
        assert_eq!(n.display_name(), "Wikipedia");
    }

    #[test]
    fn unknown_file_is_fatal_lookup_miss() {
        let err = Network::from_file_name("roadNet-TX.txt").expect_err("not registered");
        assert!(matches!(err, RippleError::UnknownNetwork(ref f) if f == "roadNet-TX.txt"));
    }

    #[test]
    fn result_keys_differ_from_display_names_where_expected() {
        assert_eq!(Network::Enron.result_key(), "ENRON");
        assert_eq!(Network::Enron.display_name(), "Enron");
        assert_eq!(
            Network::from_result_key("Human_Brain").expect("registered"),
            Network::HumanBrain
        );
    }

    #[test]
    fn reported_keys_exclude_amazon() {
        let keys = reported_result_keys();
        assert_eq!(keys.len(), 10);
        assert_eq!(keys.first(), Some(&"Dining_Table"));
        assert_eq!(keys.last(), Some(&"Higgs"));
        assert!(!keys.contains(&"Amazon"));
    }

    #[test]
    fn directedness_table() {
        let directed: Vec<Network> = Network::ALL
            .into_iter()
            .filter(|n| n.is_directed())
            .collect();
        assert_eq!(
            directed,
            vec![
                Network::Caida,
                Network::DiningTable,
                Network::Epinions,
                Network::Gnutella,
                Network::Higgs,
                Network::Wikipedia,
            ]
        );
    }
}
