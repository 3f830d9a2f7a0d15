//! # Wallet Session
//!
//! At most one connected wallet, persisted under `yielder_wallet` as
//! `{"address": "...", "walletType": "..."}`.
//!
//! ## State transitions
//!
//! ```text
//!            connect()              provider Ok
//! Idle ───────────────► Connecting ─────────────► Connected
//!   ▲                       │                        │
//!   └──── provider Err ─────┘                        │
//!   └──────────────────── disconnect() ──────────────┘
//! ```
//!
//! Provider failures reach the caller as [`ConnectionError`]; persistence
//! failures are logged and swallowed.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::StorageError;
use crate::store::{KeyValueStore, WALLET_KEY};

/// Supported wallet providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    /// Freighter browser extension.
    Freighter,
    /// Albedo web signer.
    Albedo,
    /// xBull wallet.
    XBull,
    /// LOBSTR wallet.
    Lobstr,
    /// WalletConnect bridge.
    WalletConnect,
}

impl WalletKind {
    /// Every supported kind.
    pub const ALL: [Self; 5] = [
        Self::Freighter,
        Self::Albedo,
        Self::XBull,
        Self::Lobstr,
        Self::WalletConnect,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Freighter => "Freighter",
            Self::Albedo => "Albedo",
            Self::XBull => "xBull",
            Self::Lobstr => "LOBSTR",
            Self::WalletConnect => "WalletConnect",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    /// Account address.
    pub address: String,
    /// Wallet used to connect.
    #[serde(rename = "walletType")]
    pub wallet_type: WalletKind,
}

impl WalletSession {
    /// Address shortened for display, e.g. `GABC…WXYZ`.
    #[must_use]
    pub fn short_address(&self) -> String {
        let chars: Vec<char> = self.address.chars().collect();
        if chars.len() <= 10 {
            return self.address.clone();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

/// Why a connect attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// Provider refused the request.
    #[error("wallet rejected the connection: {0}")]
    Rejected(String),

    /// User dismissed the prompt.
    #[error("connection cancelled by user")]
    Cancelled,

    /// Provider is not installed or reachable.
    #[error("{0} is not available")]
    NotInstalled(WalletKind),

    /// Provider returned an unusable address.
    #[error("wallet returned an invalid address: {0:?}")]
    InvalidAddress(String),
}

impl ConnectionError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// External wallet provider.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    /// Asks the wallet for an account address.
    ///
    /// # Errors
    ///
    /// Returns a [`ConnectionError`] on rejection, cancellation, or if the
    /// wallet is unavailable.
    async fn connect(&self, kind: WalletKind) -> Result<String, ConnectionError>;
}

/// Wallet session state backed by a key-value store.
pub struct WalletSessionStore<S> {
    store: S,
    session: Option<WalletSession>,
    connecting: bool,
    last_error: Option<ConnectionError>,
}

impl<S: KeyValueStore> WalletSessionStore<S> {
    /// Restores the persisted session, if any.
    ///
    /// An unparseable value is treated as absent and removed.
    pub fn restore(store: S) -> Self {
        let session = read_session(&store);
        if let Some(session) = &session {
            tracing::debug!(wallet = %session.wallet_type, "restored wallet session");
        }
        Self {
            store,
            session,
            connecting: false,
            last_error: None,
        }
    }

    /// Connects through `provider` and persists the new session.
    ///
    /// On failure the store is left idle with no session, in memory or
    /// persisted, and the error is both returned and kept in
    /// [`WalletSessionStore::last_error`]. Dropping the future mid-await also
    /// leaves the store idle.
    /// Callers must not start a second connect while one is in flight.
    ///
    /// # Errors
    ///
    /// Returns the provider's [`ConnectionError`], or
    /// [`ConnectionError::InvalidAddress`] for an empty address.
    pub async fn connect<P: WalletProvider>(
        &mut self,
        provider: &P,
        kind: WalletKind,
    ) -> Result<WalletSession, ConnectionError> {
        self.last_error = None;

        let reply = {
            let _connecting = ConnectingFlag::raise(&mut self.connecting);
            provider.connect(kind).await
        };
        let result = reply.and_then(|address| {
            let address = address.trim().to_string();
            if address.is_empty() {
                Err(ConnectionError::InvalidAddress(address))
            } else {
                Ok(address)
            }
        });

        match result {
            Ok(address) => {
                let session = WalletSession {
                    address,
                    wallet_type: kind,
                };
                self.persist(&session);
                self.session = Some(session.clone());
                tracing::debug!(wallet = %kind, "wallet connected");
                Ok(session)
            }
            Err(e) => {
                tracing::warn!(wallet = %kind, error = %e, "wallet connection failed");
                self.session = None;
                self.clear_persisted();
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Clears the session and its persisted value.
    pub fn disconnect(&mut self) {
        self.session = None;
        self.last_error = None;
        self.clear_persisted();
    }

    /// Current session.
    #[must_use]
    pub fn session(&self) -> Option<&WalletSession> {
        self.session.as_ref()
    }

    /// True if a wallet is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// True while a connect is awaiting the provider.
    #[must_use]
    pub fn is_connecting(&self) -> bool {
        self.connecting
    }

    /// Error from the most recent failed connect.
    #[must_use]
    pub fn last_error(&self) -> Option<&ConnectionError> {
        self.last_error.as_ref()
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.store.remove(WALLET_KEY) {
            tracing::warn!(error = %e, "failed to clear persisted wallet session");
        }
    }

    fn persist(&self, session: &WalletSession) {
        let result = serde_json::to_string(session)
            .map_err(|e| e.to_string())
            .and_then(|json| self.store.set(WALLET_KEY, &json).map_err(|e| e.to_string()));

        if let Err(reason) = result {
            tracing::warn!(%reason, "failed to persist wallet session");
        }
    }
}

/// Holds the in-flight flag up until dropped, including when the connect
/// future itself is dropped mid-await.
struct ConnectingFlag<'a>(&'a mut bool);

impl<'a> ConnectingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for ConnectingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

fn read_session<S: KeyValueStore>(store: &S) -> Option<WalletSession> {
    let parsed = match store.get(WALLET_KEY) {
        Ok(raw) => serde_json::from_str(&raw?).map_err(|e| e.to_string()),
        Err(StorageError::Corrupt { reason, .. }) => Err(reason),
        Err(e) => {
            tracing::warn!(error = %e, "failed to read wallet session");
            return None;
        }
    };

    match parsed {
        Ok(session) => Some(session),
        Err(reason) => {
            tracing::warn!(%reason, "discarding corrupted wallet session");
            if let Err(e) = store.remove(WALLET_KEY) {
                tracing::warn!(error = %e, "failed to purge corrupted wallet session");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    const ADDRESS: &str = "GDQP2KPQGKIHYJGXNUIYOMHARUARCA7DJT5FO2FFOOKY3B2WSQHG4W37";

    enum Reply {
        Address(&'static str),
        Fail(ConnectionError),
    }

    struct FakeProvider(Reply);

    /// Provider that never answers.
    struct SilentProvider;

    impl WalletProvider for SilentProvider {
        async fn connect(&self, _kind: WalletKind) -> Result<String, ConnectionError> {
            std::future::pending().await
        }
    }

    impl WalletProvider for FakeProvider {
        async fn connect(&self, _kind: WalletKind) -> Result<String, ConnectionError> {
            match &self.0 {
                Reply::Address(a) => Ok((*a).to_string()),
                Reply::Fail(e) => Err(e.clone()),
            }
        }
    }

    #[test]
    fn test_session_json_shape() {
        let session = WalletSession {
            address: "GABC".to_string(),
            wallet_type: WalletKind::XBull,
        };
        assert_eq!(
            serde_json::to_string(&session).unwrap(),
            r#"{"address":"GABC","walletType":"xbull"}"#
        );
        assert_eq!(
            WalletSession {
                address: ADDRESS.to_string(),
                wallet_type: WalletKind::Freighter
            }
            .short_address(),
            "GDQP…4W37"
        );
    }

    #[test]
    fn test_restore_valid_session() {
        let store = MemoryStore::new();
        store
            .set(WALLET_KEY, r#"{"address":"GABC","walletType":"albedo"}"#)
            .unwrap();

        let wallet = WalletSessionStore::restore(&store);
        assert_eq!(wallet.session().map(|s| s.wallet_type), Some(WalletKind::Albedo));
    }

    #[test]
    fn test_restore_corrupt_session_purges() {
        let store = MemoryStore::new();
        store.set(WALLET_KEY, "not json at all").unwrap();

        let wallet = WalletSessionStore::restore(&store);
        assert!(!wallet.is_connected());
        assert!(!store.contains(WALLET_KEY));
    }

    #[test]
    fn test_restore_unknown_wallet_kind_purges() {
        let store = MemoryStore::new();
        store
            .set(WALLET_KEY, r#"{"address":"GABC","walletType":"metamask"}"#)
            .unwrap();

        let wallet = WalletSessionStore::restore(&store);
        assert!(wallet.session().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_restore_undecodable_file_purges() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::store::FileStore::new(dir.path());
        let path = dir.path().join("yielder_wallet.json");
        std::fs::write(&path, [0x7b, 0xff, 0x7d]).unwrap();

        let wallet = WalletSessionStore::restore(&store);
        assert!(wallet.session().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_connect_persists_session() {
        let store = MemoryStore::new();
        let mut wallet = WalletSessionStore::restore(&store);

        let session = wallet
            .connect(&FakeProvider(Reply::Address(ADDRESS)), WalletKind::Freighter)
            .await
            .unwrap();

        assert_eq!(session.address, ADDRESS);
        assert!(wallet.is_connected());
        assert!(!wallet.is_connecting());

        let reloaded = WalletSessionStore::restore(&store);
        assert_eq!(reloaded.session(), Some(&session));
    }

    #[tokio::test]
    async fn test_connect_failure_rolls_back() {
        let store = MemoryStore::new();
        let mut wallet = WalletSessionStore::restore(&store);

        let err = wallet
            .connect(&FakeProvider(Reply::Fail(ConnectionError::Cancelled)), WalletKind::Lobstr)
            .await
            .unwrap_err();

        assert_eq!(err, ConnectionError::Cancelled);
        assert_eq!(err.message(), "connection cancelled by user");
        assert!(!wallet.is_connected());
        assert!(!wallet.is_connecting());
        assert_eq!(wallet.last_error(), Some(&ConnectionError::Cancelled));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_reconnect_clears_persisted_session() {
        let store = MemoryStore::new();
        let mut wallet = WalletSessionStore::restore(&store);
        wallet
            .connect(&FakeProvider(Reply::Address(ADDRESS)), WalletKind::Freighter)
            .await
            .unwrap();

        wallet
            .connect(&FakeProvider(Reply::Fail(ConnectionError::Cancelled)), WalletKind::Albedo)
            .await
            .unwrap_err();

        assert!(!wallet.is_connected());
        assert!(!store.contains(WALLET_KEY));
        assert!(WalletSessionStore::restore(&store).session().is_none());
    }

    #[tokio::test]
    async fn test_abandoned_connect_is_not_left_connecting() {
        let store = MemoryStore::new();
        let mut wallet = WalletSessionStore::restore(&store);

        let outcome = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            wallet.connect(&SilentProvider, WalletKind::Freighter),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!wallet.is_connecting());
        assert!(!wallet.is_connected());
    }

    #[tokio::test]
    async fn test_empty_address_rejected() {
        let store = MemoryStore::new();
        let mut wallet = WalletSessionStore::restore(&store);

        let err = wallet
            .connect(&FakeProvider(Reply::Address("  ")), WalletKind::Albedo)
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_disconnect_clears_everything() {
        let store = MemoryStore::new();
        let mut wallet = WalletSessionStore::restore(&store);
        wallet
            .connect(&FakeProvider(Reply::Address(ADDRESS)), WalletKind::Freighter)
            .await
            .unwrap();

        wallet.disconnect();
        assert!(!wallet.is_connected());
        assert!(!store.contains(WALLET_KEY));

        wallet.disconnect();
        assert!(!wallet.is_connected());
    }
}
