//! Token verification
//!
//! [`Verifier`] holds a registry of allowed algorithms, optional leeway for
//! the time-based claims and a set of expected claim values. Checks run in
//! a fixed order: signature first, then the time windows (`exp`, `iat`,
//! `nbf`), then the expected claims. Nothing in a token is trusted before
//! its signature has been verified against the registered algorithm named
//! by the header.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::algorithm::{Algorithm, BoxedAlgorithm};
use crate::claims::{names, Claim, ClaimMap, ClaimType};
use crate::error::{Error, Result};
use crate::token::DecodedToken;

/// Time source consulted once per verification.
///
/// The default [`SystemClock`] reads the wall clock; tests substitute a
/// fixed clock to make the time checks deterministic.
pub trait Clock {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// [`Clock`] backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// Configurable verifier for decoded tokens.
///
/// # Example
/// ```
/// use jwtmint::{Builder, DecodedToken, Verifier, HS256};
///
/// let token_str = Builder::new()
///     .issuer("https://issuer.example.com")
///     .expires_at(i64::MAX)
///     .sign(&HS256::new("secret"))
///     .unwrap();
///
/// let token = DecodedToken::from_string(&token_str).unwrap();
/// let verifier = Verifier::new()
///     .allow_algorithm(HS256::new("secret"))
///     .with_issuer("https://issuer.example.com");
///
/// assert!(verifier.verify(&token).is_ok());
/// ```
pub struct Verifier<C: Clock = SystemClock> {
    algorithms: HashMap<&'static str, BoxedAlgorithm>,
    expected: ClaimMap,
    default_leeway: u64,
    leeway_overrides: HashMap<&'static str, u64>,
    clock: C,
}

impl Verifier {
    /// Create a verifier that reads the system wall clock.
    ///
    /// No algorithms are registered and no claims are expected; a fresh
    /// verifier rejects every token with
    /// [`AlgorithmUnsupported`](Error::AlgorithmUnsupported).
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Verifier<C> {
    /// Create a verifier with a custom time source.
    pub fn with_clock(clock: C) -> Self {
        Self {
            algorithms: HashMap::new(),
            expected: ClaimMap::new(),
            default_leeway: 0,
            leeway_overrides: HashMap::new(),
            clock,
        }
    }

    // ==== Algorithm registry ====

    /// Register an algorithm under its [`name`](Algorithm::name).
    ///
    /// Tokens whose `alg` header names an unregistered algorithm are
    /// rejected, so the registry doubles as the allow-list.
    pub fn allow_algorithm<A>(mut self, algorithm: A) -> Self
    where
        A: Algorithm + Send + Sync + 'static,
    {
        self.algorithms.insert(algorithm.name(), Box::new(algorithm));
        self
    }

    // ==== Leeway ====

    /// Set the default leeway in seconds for all time-based claims.
    pub fn leeway(mut self, seconds: u64) -> Self {
        self.default_leeway = seconds;
        self
    }

    /// Set the leeway for the `exp` claim, overriding the default.
    pub fn expires_at_leeway(mut self, seconds: u64) -> Self {
        self.leeway_overrides.insert(names::EXPIRATION, seconds);
        self
    }

    /// Set the leeway for the `nbf` claim, overriding the default.
    pub fn not_before_leeway(mut self, seconds: u64) -> Self {
        self.leeway_overrides.insert(names::NOT_BEFORE, seconds);
        self
    }

    /// Set the leeway for the `iat` claim, overriding the default.
    pub fn issued_at_leeway(mut self, seconds: u64) -> Self {
        self.leeway_overrides.insert(names::ISSUED_AT, seconds);
        self
    }

    // ==== Expected claims ====

    /// Require the `iss` payload claim to equal `issuer`.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.expected.insert(names::ISSUER, issuer.into().into());
        self
    }

    /// Require the `sub` payload claim to equal `subject`.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.expected.insert(names::SUBJECT, subject.into().into());
        self
    }

    /// Require the `jti` payload claim to equal `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.expected.insert(names::TOKEN_ID, id.into().into());
        self
    }

    /// Require the token audience to contain every given name.
    ///
    /// The token may carry additional audiences beyond the expected ones.
    pub fn with_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expected
            .insert(names::AUDIENCE, Claim::from_set(audience));
        self
    }

    /// Require an arbitrary payload claim to equal `claim`.
    ///
    /// String, integer and array claims are comparable; expecting any other
    /// type fails verification with
    /// [`TokenClaimUncomparable`](Error::TokenClaimUncomparable).
    pub fn with_claim(mut self, name: impl Into<String>, claim: impl Into<Claim>) -> Self {
        self.expected.insert(name, claim.into());
        self
    }

    // ==== Verification ====

    /// Verify a decoded token against this configuration.
    ///
    /// The first failed check wins: signature, then `exp`, `iat` and `nbf`
    /// in that order, then the expected claims.
    pub fn verify(&self, token: &DecodedToken) -> Result<()> {
        self.check_signature(token)?;
        self.check_time(token)?;
        self.check_expected_claims(token)
    }

    fn check_signature(&self, token: &DecodedToken) -> Result<()> {
        let name = token.algorithm()?;
        let algorithm = self
            .algorithms
            .get(name)
            .ok_or_else(|| Error::AlgorithmUnsupported(name.to_string()))?;

        algorithm.verify(token.signing_input().as_bytes(), token.signature())
    }

    fn check_time(&self, token: &DecodedToken) -> Result<()> {
        let now = self.clock.now();

        if token.has_expires_at() {
            let expires_at = token.expires_at()?;
            let leeway = self.leeway_for(names::EXPIRATION);
            if now > expires_at.saturating_add(slack(leeway)) {
                return Err(Error::TokenExpired {
                    expired_at: expires_at,
                    now,
                    leeway,
                });
            }
        }

        if token.has_issued_at() {
            let issued_at = token.issued_at()?;
            let leeway = self.leeway_for(names::ISSUED_AT);
            if now < issued_at.saturating_sub(slack(leeway)) {
                return Err(Error::TokenIssuedInFuture {
                    issued_at,
                    now,
                    leeway,
                });
            }
        }

        if token.has_not_before() {
            let not_before = token.not_before()?;
            let leeway = self.leeway_for(names::NOT_BEFORE);
            if now < not_before.saturating_sub(slack(leeway)) {
                return Err(Error::TokenNotYetValid {
                    not_before,
                    now,
                    leeway,
                });
            }
        }

        Ok(())
    }

    fn check_expected_claims(&self, token: &DecodedToken) -> Result<()> {
        for (name, expected) in self.expected.iter() {
            match name.as_str() {
                // The time windows above already cover these.
                names::EXPIRATION | names::ISSUED_AT | names::NOT_BEFORE => continue,
                names::AUDIENCE => check_audience(token, expected)?,
                _ => check_claim_eq(token, name, expected)?,
            }
        }

        Ok(())
    }

    fn leeway_for(&self, claim: &'static str) -> u64 {
        self.leeway_overrides
            .get(claim)
            .copied()
            .unwrap_or(self.default_leeway)
    }
}

/// Clamp a leeway to the signed range used for epoch arithmetic.
fn slack(leeway: u64) -> i64 {
    i64::try_from(leeway).unwrap_or(i64::MAX)
}

/// Check that every expected audience name is presented by the token.
fn check_audience(token: &DecodedToken, expected: &Claim) -> Result<()> {
    if !token.has_audience() {
        return Err(Error::TokenMissingClaim(names::AUDIENCE.to_string()));
    }

    let presented = token.audience()?;
    let expected = expected.as_set()?;

    if expected.is_subset(&presented) {
        Ok(())
    } else {
        Err(Error::TokenClaimMismatch {
            claim: names::AUDIENCE.to_string(),
        })
    }
}

/// Check an expected claim for exact equality with the token's value.
fn check_claim_eq(token: &DecodedToken, name: &str, expected: &Claim) -> Result<()> {
    if !token.has_payload_claim(name) {
        return Err(Error::TokenMissingClaim(name.to_string()));
    }

    let actual = token.payload_claim(name)?;
    if actual.claim_type() != expected.claim_type() {
        return Err(Error::TokenClaimTypeMismatch {
            claim: name.to_string(),
            expected: expected.claim_type(),
            actual: actual.claim_type(),
        });
    }

    let matches = match expected.claim_type() {
        ClaimType::String => actual.as_string()? == expected.as_string()?,
        ClaimType::Integer => actual.as_date()? == expected.as_date()?,
        ClaimType::Array => actual.as_set()? == expected.as_set()?,
        claim_type => {
            return Err(Error::TokenClaimUncomparable {
                claim: name.to_string(),
                claim_type,
            })
        }
    };

    if matches {
        Ok(())
    } else {
        Err(Error::TokenClaimMismatch {
            claim: name.to_string(),
        })
    }
}
