//! # Event Choreography
//!
//! Every session outcome reaches the bus in the order it happened, and
//! failures leave state untouched while still publishing an event.

#[cfg(test)]
mod tests {
    use hc_03_claim_proofs::ClaimType;
    use hc_runtime::{VaultConfig, VaultError};
    use shared_bus::{EventFilter, EventStream, EventTopic, Subscription, VaultEvent};
    use tokio_stream::StreamExt;

    use crate::integration::fixtures::{upload, verify_as, vault, vault_with, DOCTOR, PATIENT};

    fn drain(subscription: &mut Subscription) -> Vec<VaultEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = subscription.try_recv() {
            events.push(event);
        }
        events
    }

    fn kind(event: &VaultEvent) -> &'static str {
        match event {
            VaultEvent::DocumentUploaded { .. } => "uploaded",
            VaultEvent::DocumentVerified { .. } => "verified",
            VaultEvent::SelectionChanged { .. } => "selection",
            VaultEvent::AccessGranted { .. } => "granted",
            VaultEvent::ProofGenerated { .. } => "proof",
            VaultEvent::WalletChanged { .. } => "wallet",
            VaultEvent::ActionRejected { .. } => "rejected",
            VaultEvent::UpstreamFailed { .. } => "upstream",
            VaultEvent::EventsMissed { .. } => "missed",
        }
    }

    #[tokio::test]
    async fn test_share_flow_event_order() {
        let (session, backend) = vault();
        let mut all = session.subscribe(EventFilter::all());

        let id = upload(&session, &backend, b"referral letter").await;
        let _ = session.toggle_selection(id);
        verify_as(&session, &backend, DOCTOR, id).await;
        session.toggle_selection(id).unwrap();
        session.grant_access(&["1"]).await.unwrap();

        let kinds: Vec<_> = drain(&mut all).iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec!["uploaded", "rejected", "verified", "selection", "granted"]
        );
    }

    #[tokio::test]
    async fn test_grant_event_matches_ledger() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"scan").await;
        verify_as(&session, &backend, DOCTOR, id).await;
        let mut sharing = session.subscribe(EventFilter::topics(vec![EventTopic::Sharing]));

        session.toggle_selection(id).unwrap();
        let grant = session.grant_access(&["1", "2"]).await.unwrap();

        match sharing.try_recv().unwrap() {
            Some(VaultEvent::AccessGranted {
                grant_id,
                owner,
                document_ids,
                facility_addresses,
                tx_hash,
            }) => {
                assert_eq!(grant_id, grant.id);
                assert_eq!(owner, PATIENT);
                assert_eq!(document_ids, vec![id]);
                assert_eq!(facility_addresses.len(), 2);
                assert_eq!(tx_hash, grant.transaction_hash);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_content_store_failure_is_published_verbatim() {
        let (session, backend) = vault();
        backend.chain.switch_to(Some(PATIENT));
        let mut failures = session.subscribe(EventFilter::topics(vec![EventTopic::Failures]));

        backend.store.fail_next("pinning quota exceeded");
        let err = session
            .upload_document(b"scan", hc_01_document_registry::DocumentType::Other)
            .await
            .unwrap_err();

        assert!(matches!(err, VaultError::Upstream(_)));
        assert!(session.documents().is_empty());
        assert!(backend.store.is_empty());
        assert_eq!(
            failures.try_recv().unwrap(),
            Some(VaultEvent::UpstreamFailed {
                action: "upload_document".to_string(),
                service: "content store".to_string(),
                message: "pinning quota exceeded".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_contract_revert_on_grant_keeps_state() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"scan").await;
        verify_as(&session, &backend, DOCTOR, id).await;
        session.toggle_selection(id).unwrap();
        let mut failures = session.subscribe(EventFilter::topics(vec![EventTopic::Failures]));

        backend.chain.fail_next("execution reverted: out of gas");
        assert!(session.grant_access(&["1"]).await.is_err());

        assert!(session.history().is_empty());
        assert_eq!(session.current_selection().len(), 1);
        match failures.try_recv().unwrap() {
            Some(VaultEvent::UpstreamFailed { service, message, .. }) => {
                assert_eq!(service, "contract");
                assert_eq!(message, "execution reverted: out of gas");
            }
            other => panic!("unexpected event {other:?}"),
        }

        // Retrying after the failure succeeds
        assert!(session.grant_access(&["1"]).await.is_ok());
    }

    #[tokio::test]
    async fn test_local_verification_fallback_event() {
        let config = VaultConfig {
            allow_local_verification_fallback: true,
            ..VaultConfig::for_testing()
        };
        let (session, backend) = vault_with(config);
        let id = upload(&session, &backend, b"scan").await;
        let mut documents = session.subscribe(EventFilter::topics(vec![EventTopic::Documents]));

        backend.chain.switch_to(Some(DOCTOR));
        backend.chain.fail_next("rpc unavailable");
        session.verify_document(id).await.unwrap();

        assert_eq!(backend.chain.verifier_of(id), None);
        assert_eq!(
            documents.try_recv().unwrap(),
            Some(VaultEvent::DocumentVerified {
                document_id: id,
                verifier: DOCTOR,
                on_chain: false,
                tx_hash: None,
            })
        );
    }

    #[tokio::test]
    async fn test_proof_events_stream_in_claim_order() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"id card").await;
        let mut stream = EventStream::new(
            session.subscribe(EventFilter::topics(vec![EventTopic::Proofs])),
        );

        let claims = [ClaimType::AgeAbove21, ClaimType::HasValidPrescription];
        let proofs = session.generate_proofs(id, &claims).await.unwrap();

        for (proof, claim) in proofs.iter().zip(claims) {
            let event = stream.next().await.unwrap();
            assert_eq!(
                event,
                VaultEvent::ProofGenerated {
                    proof_id: proof.proof_id.clone(),
                    document_id: id,
                    claim_type: claim.as_str().to_string(),
                }
            );
        }
    }
}
