//! Per-algorithm round-trip tests
//!
//! These tests verify that each supported algorithm can successfully:
//! 1. Sign a token through the builder
//! 2. Verify the token through a configured verifier
//! 3. Preserve all claims through the round-trip

use jwtmint::{Algorithm, Builder, DecodedToken, Error, Verifier};

fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

fn standard_builder() -> Builder {
    Builder::new()
        .issuer("https://example.com")
        .subject("test-user")
        .audience(["test-app"])
        .issued_at(now())
        .expires_at(now() + 3600)
}

fn assert_round_trip<S, V>(signing: &S, verifying: V)
where
    S: Algorithm,
    V: Algorithm + Send + Sync + 'static,
{
    let name = signing.name();
    let token_str = standard_builder().sign(signing).expect("signing failed");

    let token = DecodedToken::from_string(&token_str).expect("parse failed");
    assert_eq!(token.algorithm().unwrap(), name);

    let verifier = Verifier::new()
        .allow_algorithm(verifying)
        .with_issuer("https://example.com")
        .with_audience(["test-app"]);
    verifier.verify(&token).expect("verification failed");

    assert_eq!(token.issuer().unwrap(), "https://example.com");
    assert_eq!(token.subject().unwrap(), "test-user");
}

// ============================================================================
// HMAC Algorithm Round-Trips (HS256, HS384, HS512)
// ============================================================================

mod hmac_tests {
    use super::*;
    use jwtmint::{HS256, HS384, HS512};

    #[test]
    fn round_trip_hs256() {
        let secret = "test-secret-hs256-key";
        assert_round_trip(&HS256::new(secret), HS256::new(secret));
    }

    #[test]
    fn round_trip_hs384() {
        let secret = "test-secret-hs384-key-needs-to-be-longer";
        assert_round_trip(&HS384::new(secret), HS384::new(secret));
    }

    #[test]
    fn round_trip_hs512() {
        let secret = "test-secret-hs512-key-needs-to-be-even-longer-for-512-bits";
        assert_round_trip(&HS512::new(secret), HS512::new(secret));
    }
}

// ============================================================================
// ECDSA Algorithm Round-Trips (ES256, ES384, ES512)
// ============================================================================

#[cfg(feature = "ecdsa")]
mod ecdsa_tests {
    use super::*;
    use jwtmint::{
        ES256, ES384, ES512, P256SigningKey, P384SigningKey, P521SigningKey,
    };
    use rand_core::OsRng;

    #[test]
    fn round_trip_es256() {
        let key = P256SigningKey::random(&mut OsRng);
        assert_round_trip(&ES256::new(key.clone()), ES256::new(key));
    }

    #[test]
    fn round_trip_es384() {
        let key = P384SigningKey::random(&mut OsRng);
        assert_round_trip(&ES384::new(key.clone()), ES384::new(key));
    }

    #[test]
    fn round_trip_es512() {
        let key = P521SigningKey::random(&mut OsRng);
        assert_round_trip(&ES512::new(key.clone()), ES512::new(key));
    }

    #[test]
    fn round_trip_es256_verify_only_registry() {
        // The verifier side only needs the public half.
        let key = P256SigningKey::random(&mut OsRng);
        assert_round_trip(
            &ES256::new(key.clone()),
            ES256::public_only(*key.verifying_key()),
        );
    }

    #[test]
    fn es256_signature_has_fixed_width() {
        let token_str = standard_builder()
            .sign(&ES256::new(P256SigningKey::random(&mut OsRng)))
            .unwrap();

        let token = DecodedToken::from_string(&token_str).unwrap();
        assert_eq!(token.signature().len(), 64, "raw r || s, 32 bytes each");
    }
}

// ============================================================================
// Unsecured Round-Trip
// ============================================================================

mod unsecured_tests {
    use super::*;
    use jwtmint::Unsecured;

    #[test]
    fn round_trip_none() {
        assert_round_trip(&Unsecured, Unsecured);
    }
}

// ============================================================================
// Cross-Algorithm Verification Tests
// ============================================================================

mod cross_algorithm_tests {
    use super::*;
    use jwtmint::{HS256, HS384};

    #[test]
    fn registry_restricts_accepted_algorithms() {
        let secret = "test-secret";
        let token_str = standard_builder().sign(&HS256::new(secret)).unwrap();
        let token = DecodedToken::from_string(&token_str).unwrap();

        // Should succeed with HS256 registered
        let accepting = Verifier::new().allow_algorithm(HS256::new(secret));
        assert!(
            accepting.verify(&token).is_ok(),
            "Should accept HS256 when registered"
        );

        // Should fail when only HS384 is registered
        let rejecting = Verifier::new().allow_algorithm(HS384::new(secret));
        assert!(
            matches!(
                rejecting.verify(&token),
                Err(Error::AlgorithmUnsupported(_))
            ),
            "Should reject HS256 when not registered"
        );
    }

    #[test]
    fn registry_dispatches_between_algorithms() {
        let verifier = Verifier::new()
            .allow_algorithm(HS256::new("secret-a"))
            .allow_algorithm(HS384::new("secret-b"));

        let hs256_token = standard_builder().sign(&HS256::new("secret-a")).unwrap();
        let hs384_token = standard_builder().sign(&HS384::new("secret-b")).unwrap();

        for token_str in [hs256_token, hs384_token] {
            let token = DecodedToken::from_string(&token_str).unwrap();
            assert!(verifier.verify(&token).is_ok());
        }

        // A token naming one algorithm but signed with the other's secret fails.
        let confused = standard_builder().sign(&HS256::new("secret-b")).unwrap();
        let token = DecodedToken::from_string(&confused).unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(Error::SignatureInvalid)
        ));
    }
}
