// ahb-check-core/src/core/edifact.rs
// ============================================================================
// Module: EDIFACT Formats
// Description: EDIFACT message formats and format versions.
// Purpose: Avoid stringly typed format parameters across the evaluators.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The EDIFACT message formats of the German energy market and the format
//! versions (validity periods) of their application handbooks. Logic bundles
//! are registered per format and version.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Edifact Format
// ============================================================================

/// Existing EDIFACT formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdifactFormat {
    /// Acknowledgement of a message
    APERAK,
    /// Communication dispute
    COMDIS,
    /// Syntax and service report
    CONTRL,
    /// Multimodal status report
    IFTSTA,
    /// Inspection report
    INSRPT,
    /// Invoice
    INVOIC,
    /// Meter readings
    MSCONS,
    /// Changing an order
    ORDCHG,
    /// Orders
    ORDERS,
    /// Orders response
    ORDRSP,
    /// Price catalogue
    PRICAT,
    /// Quotes
    QUOTES,
    /// Remittance advice
    REMADV,
    /// Request quote
    REQOTE,
    /// Market partner data
    PARTIN,
    /// Utilities master data
    UTILMD,
    /// Utilities master data gas
    UTILMDG,
    /// Utilities master data electricity
    UTILMDS,
    /// Utilities master data water
    UTILMDW,
    /// Formula
    UTILTS,
}

impl EdifactFormat {
    /// Returns the canonical format name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APERAK => "APERAK",
            Self::COMDIS => "COMDIS",
            Self::CONTRL => "CONTRL",
            Self::IFTSTA => "IFTSTA",
            Self::INSRPT => "INSRPT",
            Self::INVOIC => "INVOIC",
            Self::MSCONS => "MSCONS",
            Self::ORDCHG => "ORDCHG",
            Self::ORDERS => "ORDERS",
            Self::ORDRSP => "ORDRSP",
            Self::PRICAT => "PRICAT",
            Self::QUOTES => "QUOTES",
            Self::REMADV => "REMADV",
            Self::REQOTE => "REQOTE",
            Self::PARTIN => "PARTIN",
            Self::UTILMD => "UTILMD",
            Self::UTILMDG => "UTILMDG",
            Self::UTILMDS => "UTILMDS",
            Self::UTILMDW => "UTILMDW",
            Self::UTILTS => "UTILTS",
        }
    }

    /// Parses a format from its canonical name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|format| format.as_str() == name)
    }

    /// Returns all formats in canonical order
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::APERAK,
            Self::COMDIS,
            Self::CONTRL,
            Self::IFTSTA,
            Self::INSRPT,
            Self::INVOIC,
            Self::MSCONS,
            Self::ORDCHG,
            Self::ORDERS,
            Self::ORDRSP,
            Self::PRICAT,
            Self::QUOTES,
            Self::REMADV,
            Self::REQOTE,
            Self::PARTIN,
            Self::UTILMD,
            Self::UTILMDG,
            Self::UTILMDS,
            Self::UTILMDW,
            Self::UTILTS,
        ]
    }
}

impl fmt::Display for EdifactFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Format Version
// ============================================================================

/// One format version refers to the period in which an AHB is valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EdifactFormatVersion {
    /// Valid from 2021-04-01
    FV2104,
    /// Valid from 2021-10-01
    FV2110,
    /// Valid from 2022-04-01 ("MaKo 2022")
    FV2204,
    /// Valid from 2022-10-01
    FV2210,
    /// Valid from 2023-04-01
    FV2304,
    /// Valid from 2023-10-01
    FV2310,
    /// Valid from 2024-04-01
    FV2404,
    /// Valid from 2024-10-01
    FV2410,
    /// Valid from 2025-04-01
    FV2504,
}

impl EdifactFormatVersion {
    /// Returns the canonical version name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FV2104 => "FV2104",
            Self::FV2110 => "FV2110",
            Self::FV2204 => "FV2204",
            Self::FV2210 => "FV2210",
            Self::FV2304 => "FV2304",
            Self::FV2310 => "FV2310",
            Self::FV2404 => "FV2404",
            Self::FV2410 => "FV2410",
            Self::FV2504 => "FV2504",
        }
    }
}

impl fmt::Display for EdifactFormatVersion {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Pruefidentifikator Mapping
// ============================================================================

/// Errors for Prüfidentifikator handling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdifactError {
    /// The Prüfidentifikator does not consist of five digits with a non-zero
    /// leading digit
    #[error("the pruefidentifikator '{0}' is invalid")]
    InvalidPruefidentifikator(String),
}

/// Returns the format corresponding to a given Prüfidentifikator
///
/// The two leading digits of a Prüfidentifikator identify the message
/// format; unknown prefixes yield `None`.
///
/// # Errors
///
/// Returns [`EdifactError::InvalidPruefidentifikator`] when the input is not
/// a five-digit identifier with a non-zero leading digit.
pub fn pruefidentifikator_to_format(pruefidentifikator: &str) -> Result<Option<EdifactFormat>, EdifactError> {
    let bytes = pruefidentifikator.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[0].is_ascii_digit()
        && bytes[0] != b'0'
        && bytes.iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(EdifactError::InvalidPruefidentifikator(pruefidentifikator.to_owned()));
    }
    let format = match &pruefidentifikator[..2] {
        "99" => Some(EdifactFormat::APERAK),
        "29" => Some(EdifactFormat::COMDIS),
        "21" => Some(EdifactFormat::IFTSTA),
        "23" => Some(EdifactFormat::INSRPT),
        "31" => Some(EdifactFormat::INVOIC),
        "13" => Some(EdifactFormat::MSCONS),
        "39" => Some(EdifactFormat::ORDCHG),
        "17" => Some(EdifactFormat::ORDERS),
        "19" => Some(EdifactFormat::ORDRSP),
        "27" => Some(EdifactFormat::PRICAT),
        "15" => Some(EdifactFormat::QUOTES),
        "33" => Some(EdifactFormat::REMADV),
        "37" => Some(EdifactFormat::PARTIN),
        "11" => Some(EdifactFormat::UTILMD),
        "25" => Some(EdifactFormat::UTILTS),
        _ => None,
    };
    Ok(format)
}
