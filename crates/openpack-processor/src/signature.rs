//! Payment authorization: ed25519 verification, signer ceilings, and
//! nonce replay prevention.
//!
//! Check order matters. The signature is verified first, then the
//! signer's value ceiling, then the nonce — and the nonce is consumed
//! only after every check has passed, so a rejected payment never burns
//! its nonce.

use std::collections::{HashMap, HashSet};

use ed25519_dalek::{Signature, VerifyingKey};
use openpack_types::{AccountId, OpenpackError, Order, Payment, Result};

/// Verifies signed payment authorizations for one processor identity.
#[derive(Debug)]
pub struct SignatureVerifier {
    /// The processor identity bound into every signing payload.
    processor: AccountId,
    /// Per-signer authorized value ceiling. Unknown signers have limit 0.
    signer_limits: HashMap<AccountId, u64>,
    /// Consumed `(signer, nonce)` pairs.
    used_nonces: HashMap<AccountId, HashSet<u64>>,
}

impl SignatureVerifier {
    #[must_use]
    pub fn new(processor: AccountId) -> Self {
        Self {
            processor,
            signer_limits: HashMap::new(),
            used_nonces: HashMap::new(),
        }
    }

    /// Authorize `signer` for payments up to `limit`. A limit of 0
    /// revokes the signer.
    pub fn set_signer_limit(&mut self, signer: AccountId, limit: u64) {
        tracing::info!(%signer, limit, "signer limit updated");
        self.signer_limits.insert(signer, limit);
    }

    #[must_use]
    pub fn signer_limit(&self, signer: AccountId) -> u64 {
        self.signer_limits.get(&signer).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_nonce_used(&self, signer: AccountId, nonce: u64) -> bool {
        self.used_nonces
            .get(&signer)
            .is_some_and(|nonces| nonces.contains(&nonce))
    }

    /// Verify a payment against `seller` and `order`, consume its nonce,
    /// and return the authorizing signer.
    pub fn verify(
        &mut self,
        seller: AccountId,
        order: &Order,
        payment: &Payment,
    ) -> Result<AccountId> {
        let key = VerifyingKey::from_bytes(&payment.signer.0).map_err(|err| {
            OpenpackError::InvalidSignature {
                reason: format!("malformed signer key: {err}"),
            }
        })?;
        let signature = Signature::from_slice(&payment.signature).map_err(|err| {
            OpenpackError::InvalidSignature {
                reason: format!("malformed signature: {err}"),
            }
        })?;
        let payload = Payment::signing_payload(self.processor, seller, order, &payment.params);
        key.verify_strict(&payload, &signature)
            .map_err(|_| OpenpackError::InvalidSignature {
                reason: "signature does not cover this processor, seller, and order".into(),
            })?;

        let limit = self.signer_limit(payment.signer);
        if limit < payment.params.value {
            return Err(OpenpackError::SignerNotAuthorized {
                limit,
                value: payment.params.value,
            });
        }

        let nonces = self.used_nonces.entry(payment.signer).or_default();
        if !nonces.insert(payment.params.nonce) {
            return Err(OpenpackError::ReplayedNonce {
                signer_hex: hex::encode(payment.signer.0),
                nonce: payment.params.nonce,
            });
        }
        Ok(payment.signer)
    }
}
