//! Routing of block names to output categories.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Subdirectory an extracted handler is written to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    Wallet,
    Transactions,
    Dex,
    Nft,
    Escrow,
    Defi,
    Help,
    /// Fallback for names missing from the index.
    #[default]
    Misc,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Core,
        Category::Wallet,
        Category::Transactions,
        Category::Dex,
        Category::Nft,
        Category::Escrow,
        Category::Defi,
        Category::Help,
        Category::Misc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Core => "core",
            Category::Wallet => "wallet",
            Category::Transactions => "transactions",
            Category::Dex => "dex",
            Category::Nft => "nft",
            Category::Escrow => "escrow",
            Category::Defi => "defi",
            Category::Help => "help",
            Category::Misc => "misc",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == lowered)
            .ok_or_else(|| Error::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const BUILTIN: &[(&str, Category)] = &[
    ("xrp_validate_address", Category::Core),
    ("xrp_get_account_info", Category::Core),
    ("xrp_get_balance", Category::Core),
    ("xrp_get_ledger", Category::Core),
    ("xrp_get_transaction", Category::Core),
    ("xrp_get_server_info", Category::Core),
    ("xrp_create_wallet", Category::Wallet),
    ("xrp_import_wallet", Category::Wallet),
    ("xrp_fund_testnet_account", Category::Wallet),
    ("xrp_get_wallet_address", Category::Wallet),
    ("xrp_send_payment", Category::Transactions),
    ("xrp_get_account_transactions", Category::Transactions),
    ("xrp_estimate_fees", Category::Transactions),
    ("xrp_decode_transaction", Category::Transactions),
    ("xrp_place_order", Category::Dex),
    ("xrp_cancel_order", Category::Dex),
    ("xrp_get_order_book", Category::Dex),
    ("xrp_get_offers", Category::Dex),
    ("xrp_check_payment_path", Category::Dex),
    ("xrp_mint_nft", Category::Nft),
    ("xrp_burn_nft", Category::Nft),
    ("xrp_create_nft_offer", Category::Nft),
    ("xrp_accept_nft_offer", Category::Nft),
    ("xrp_get_nfts", Category::Nft),
    ("xrp_generate_nft_image", Category::Nft),
    ("xrp_mint_nft_with_ipfs", Category::Nft),
    ("xrp_create_escrow", Category::Escrow),
    ("xrp_finish_escrow", Category::Escrow),
    ("xrp_cancel_escrow", Category::Escrow),
    ("xrp_get_escrows", Category::Escrow),
    ("xrp_create_trustline", Category::Defi),
    ("xrp_remove_trustline", Category::Defi),
    ("xrp_get_trustlines", Category::Defi),
    ("xrp_send_token", Category::Defi),
    ("xrp_get_amm_info", Category::Defi),
    ("xrp_set_account_settings", Category::Defi),
    ("xrp_get_account_objects", Category::Defi),
    ("xrp_get_ledger_entry", Category::Defi),
    ("xrp_subscribe", Category::Defi),
    ("xrp_get_conversation_guidance", Category::Help),
];

/// Immutable mapping from block name to [`Category`].
///
/// Built once before a session starts; [`CategoryIndex::lookup`] is total and
/// answers [`Category::Misc`] for any name it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: BTreeMap<String, Category>,
}

impl CategoryIndex {
    /// An index with no entries; every lookup falls back to `misc`.
    pub fn new() -> Self {
        Self::default()
    }

    /// The index of the known `xrp_*` handlers.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|&(name, category)| (name.to_string(), category))
            .collect()
    }

    /// Add or replace one mapping.
    pub fn insert(&mut self, name: impl Into<String>, category: Category) -> &mut Self {
        self.entries.insert(name.into(), category);
        self
    }

    pub fn lookup(&self, name: &str) -> Category {
        self.entries.get(name).copied().unwrap_or(Category::Misc)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Category)> {
        self.entries.iter().map(|(name, category)| (name.as_str(), *category))
    }
}

impl FromIterator<(String, Category)> for CategoryIndex {
    fn from_iter<I: IntoIterator<Item = (String, Category)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, Category)> for CategoryIndex {
    fn extend<I: IntoIterator<Item = (String, Category)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
