//! # Document Flows
//!
//! Upload, verification, selection, sharing and claim proofs, end to end.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::atomic::Ordering;

    use hc_01_document_registry::{DocumentType, RegistryError};
    use hc_02_access_ledger::LedgerError;
    use hc_03_claim_proofs::{ClaimType, ProofError};
    use hc_runtime::VaultError;
    use proptest::prelude::*;
    use shared_types::Address;

    use crate::integration::fixtures::{upload, verify_as, vault, DOCTOR, NURSE, PATIENT};

    #[tokio::test]
    async fn test_patient_shares_verified_record() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"discharge summary").await;

        assert_eq!(
            session.toggle_selection(id).unwrap_err(),
            VaultError::Registry(RegistryError::NotVerified(id))
        );

        verify_as(&session, &backend, DOCTOR, id).await;
        assert_eq!(backend.chain.verifier_of(id), Some(DOCTOR));

        assert!(session.toggle_selection(id).unwrap());
        let grant = session.grant_access(&["2", "4"]).await.unwrap();

        assert_eq!(grant.owner, PATIENT);
        assert_eq!(grant.document_ids, BTreeSet::from([id]));
        assert_eq!(grant.facility_addresses.len(), 2);
        assert!(session.current_selection().is_empty());
        assert_eq!(session.history().len(), 1);

        for facility in &grant.facility_addresses {
            assert!(session.check_access(id, *facility).await.unwrap());
        }
        let stranger = Address::new([0x42; 20]);
        assert!(!session.check_access(id, stranger).await.unwrap());
    }

    #[tokio::test]
    async fn test_owner_verification_refused_without_contract_call() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"allergy list").await;

        assert!(matches!(
            session.verify_document(id).await.unwrap_err(),
            VaultError::Registry(RegistryError::SelfVerification { .. })
        ));
        assert_eq!(backend.chain.calls().verify.load(Ordering::Relaxed), 0);
        assert!(!session.document(id).unwrap().is_verified());
    }

    #[tokio::test]
    async fn test_first_verifier_is_kept() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"vaccination card").await;

        verify_as(&session, &backend, DOCTOR, id).await;
        verify_as(&session, &backend, NURSE, id).await;

        assert_eq!(session.document(id).unwrap().verified_by, Some(DOCTOR));
        assert_eq!(backend.chain.calls().verify.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let (session, backend) = vault();
        let first = upload(&session, &backend, b"first").await;
        let second = upload(&session, &backend, b"second").await;
        verify_as(&session, &backend, DOCTOR, first).await;
        verify_as(&session, &backend, DOCTOR, second).await;

        session.toggle_selection(first).unwrap();
        let older = session.grant_access(&["1"]).await.unwrap();
        session.toggle_selection(second).unwrap();
        let newer = session.grant_access(&["5"]).await.unwrap();

        let history = session.history();
        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[1].id, older.id);
        assert_eq!(backend.chain.calls().grant.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_others_cannot_select_patient_documents() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"mri report").await;
        verify_as(&session, &backend, DOCTOR, id).await;

        backend.chain.switch_to(Some(NURSE));
        assert!(matches!(
            session.toggle_selection(id).unwrap_err(),
            VaultError::Registry(RegistryError::PermissionDenied { .. })
        ));
        assert!(matches!(
            session.grant_access(&["1"]).await.unwrap_err(),
            VaultError::Ledger(LedgerError::EmptySelection)
        ));
    }

    #[tokio::test]
    async fn test_my_documents_follow_active_wallet() {
        let (session, backend) = vault();
        upload(&session, &backend, b"a").await;
        upload(&session, &backend, b"b").await;

        assert_eq!(session.my_documents().len(), 2);
        backend.chain.switch_to(Some(DOCTOR));
        assert!(session.my_documents().is_empty());
        assert_eq!(session.documents().len(), 2);
    }

    #[tokio::test]
    async fn test_upload_records_fingerprint_and_content() {
        let (session, backend) = vault();
        backend.chain.switch_to(Some(PATIENT));
        let doc = session
            .upload_document(b"insurance policy", DocumentType::InsuranceCard)
            .await
            .unwrap();

        assert!(doc.encryption_hash.starts_with("0x"));
        assert_eq!(doc.encryption_hash.len(), 66);
        assert!(doc.content_id.starts_with("Qm"));
        assert_eq!(backend.store.get(&doc.content_id).unwrap(), b"insurance policy");
        assert_eq!(
            session.config().content_url(&doc.content_id),
            format!("https://ipfs.io/ipfs/{}", doc.content_id)
        );
    }

    #[tokio::test]
    async fn test_claim_proofs_for_owned_document() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"birth certificate").await;

        let proofs = session.generate_proofs(id, &ClaimType::ALL).await.unwrap();
        assert_eq!(proofs.len(), ClaimType::ALL.len());
        for (proof, claim) in proofs.iter().zip(ClaimType::ALL) {
            assert_eq!(proof.claim_type, claim);
            assert_eq!(proof.owner, PATIENT);
            assert!(session.verify_proof(proof).await.unwrap());
        }
        assert_eq!(backend.prover.issued_count(), ClaimType::ALL.len());

        assert_eq!(
            session.generate_proofs(id, &[]).await.unwrap_err(),
            VaultError::Proof(ProofError::NoClaims)
        );
    }

    #[tokio::test]
    async fn test_wallet_required_for_actions() {
        let (session, _backend) = vault();
        assert_eq!(
            session.toggle_selection(1).unwrap_err(),
            VaultError::WalletNotConnected
        );
        assert_eq!(
            session.grant_access(&["1"]).await.unwrap_err(),
            VaultError::WalletNotConnected
        );
        assert_eq!(
            session.generate_proofs(1, &[ClaimType::IsInsured]).await.unwrap_err(),
            VaultError::WalletNotConnected
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// A grant carries exactly the documents toggled an odd number of times.
        #[test]
        fn prop_grant_matches_toggle_parity(toggles in prop::collection::vec(0usize..4, 0..16)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let (session, backend) = vault();
                let mut ids = Vec::new();
                for i in 0..4u8 {
                    let id = upload(&session, &backend, &[b'd', i]).await;
                    verify_as(&session, &backend, DOCTOR, id).await;
                    ids.push(id);
                }

                let mut expected = BTreeSet::new();
                for &t in &toggles {
                    let id = ids[t];
                    if !expected.remove(&id) {
                        expected.insert(id);
                    }
                    session.toggle_selection(id).unwrap();
                }
                assert_eq!(session.current_selection(), expected);

                match session.grant_access(&["3"]).await {
                    Ok(grant) => {
                        assert_eq!(grant.document_ids, expected);
                        assert!(session.current_selection().is_empty());
                    }
                    Err(e) => {
                        assert!(expected.is_empty());
                        assert_eq!(e, VaultError::Ledger(LedgerError::EmptySelection));
                    }
                }
            });
        }
    }
}
