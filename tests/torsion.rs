// Checks a verifier against the torsion subgroup table, the way an
// external test suite would use it.

#![allow(non_snake_case)]

use edsig25519::ed25519::Point;
use edsig25519::subgroup::classify;
use edsig25519::torsion::{TORSION_ORDERS, TORSION_SUBGROUP};
use edsig25519::{Classification, Engine, KeyPair, SubgroupPolicy, VerifyError};
use sha2::Sha512;

#[test]
fn torsion_points_decode_and_classify() {
    for (enc, order) in TORSION_SUBGROUP.iter().zip(TORSION_ORDERS.iter()) {
        let P = Point::decode(enc).unwrap();
        assert_eq!(&P.encode(), enc);
        match classify(&P) {
            Classification::Identity => assert_eq!(*order, 1),
            Classification::LowOrder { order: o } => assert_eq!(o, *order),
            c => panic!("unexpected classification {:?}", c),
        }
    }
}

#[test]
fn torsion_public_keys() {
    let strict = Engine::<Sha512>::new(SubgroupPolicy::Strict);
    let permissive = Engine::<Sha512>::new(SubgroupPolicy::Permissive);

    // R = neutral, S = 0: the cofactored equation holds for every
    // low-order public key and every message.
    let mut sig = [0u8; 64];
    sig[0] = 1;
    for pk in TORSION_SUBGROUP.iter() {
        for msg in [&b""[..], &b"abc"[..], &[0xFFu8; 100][..]].iter() {
            assert_eq!(strict.verify(pk, msg, &sig),
                Err(VerifyError::SubgroupViolation));
            assert_eq!(permissive.verify(pk, msg, &sig), Ok(()));
        }
    }
}

#[test]
fn torsion_r_values() {
    let strict = Engine::<Sha512>::new(SubgroupPolicy::Strict);
    let kp = KeyPair::from_seed::<Sha512>(&[7u8; 32]);
    let pk = kp.public_key.encode();
    let msg = b"torsion R";
    let sig = strict.sign_with(&kp, msg).to_bytes();
    assert_eq!(strict.verify(&pk, msg, &sig), Ok(()));

    // Replacing R with a torsion point breaks the equation; the
    // equation failure is reported first.
    for enc in TORSION_SUBGROUP.iter() {
        let mut bad = sig;
        bad[..32].copy_from_slice(enc);
        assert_eq!(strict.verify(&pk, msg, &bad),
            Err(VerifyError::EquationMismatch));
    }
}

#[test]
fn round_trip_and_determinism() {
    let engine = Engine::<Sha512>::new(SubgroupPolicy::Strict);
    for i in 0..16u8 {
        let seed = [i; 32];
        let kp = engine.keygen(&seed);
        let enc = kp.public_key.encode();
        let P = Point::decode(&enc).unwrap();
        assert!(P.equals(kp.public_key.point) == 0xFFFFFFFF);
        assert_eq!(P.encode(), enc);
        assert_eq!(classify(&P), Classification::PrimeOrder);

        let msg = [i; 17];
        let s1 = engine.sign(&seed, &msg);
        let s2 = engine.sign(&seed, &msg);
        assert_eq!(s1, s2);
        assert_eq!(engine.verify(&enc, &msg, &s1.to_bytes()), Ok(()));
    }
}
