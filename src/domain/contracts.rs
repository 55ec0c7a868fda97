//! Deployed Contract Registry
//!
//! Symbolic names for the AlgoHealX smart contracts. App ids are bound in
//! configuration after deployment; an unbound name cannot be called.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Unknown contract: {0}")]
    UnknownName(String),
    #[error("Contract {0} has no app id; set contracts.{1} in the config after deployment")]
    NotDeployed(ContractKind, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    MedicineRegistry,
    SupplyChainTracker,
    VerificationContract,
    RegulatorApproval,
}

impl ContractKind {
    pub const ALL: [ContractKind; 4] = [
        ContractKind::MedicineRegistry,
        ContractKind::SupplyChainTracker,
        ContractKind::VerificationContract,
        ContractKind::RegulatorApproval,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ContractKind::MedicineRegistry => "MEDICINE_REGISTRY",
            ContractKind::SupplyChainTracker => "SUPPLY_CHAIN_TRACKER",
            ContractKind::VerificationContract => "VERIFICATION_CONTRACT",
            ContractKind::RegulatorApproval => "REGULATOR_APPROVAL",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractKind {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ContractError::UnknownName(s.to_string()))
    }
}

/// App ids of deployed contracts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRegistry {
    #[serde(default)]
    pub medicine_registry: Option<u64>,
    #[serde(default)]
    pub supply_chain_tracker: Option<u64>,
    #[serde(default)]
    pub verification_contract: Option<u64>,
    #[serde(default)]
    pub regulator_approval: Option<u64>,
}

impl ContractRegistry {
    /// App id bound to `kind`, if deployed
    pub fn app_id(&self, kind: ContractKind) -> Option<u64> {
        let id = match kind {
            ContractKind::MedicineRegistry => self.medicine_registry,
            ContractKind::SupplyChainTracker => self.supply_chain_tracker,
            ContractKind::VerificationContract => self.verification_contract,
            ContractKind::RegulatorApproval => self.regulator_approval,
        };
        id.filter(|id| *id != 0)
    }

    /// Resolve either a numeric app id or a contract name
    pub fn resolve(&self, app: &str) -> Result<u64, ContractError> {
        if let Ok(id) = app.parse::<u64>() {
            return Ok(id);
        }

        let kind: ContractKind = app.parse()?;
        self.app_id(kind)
            .ok_or_else(|| ContractError::NotDeployed(kind, kind.name().to_lowercase()))
    }
}
