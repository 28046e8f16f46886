//! # Concurrency
//!
//! One action of each kind at a time, with wallet notifications arriving
//! while actions run.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use hc_01_document_registry::DocumentType;
    use hc_runtime::{ActionKind, VaultError};
    use shared_bus::{EventFilter, EventTopic, VaultEvent};
    use tokio::time::timeout;

    use crate::integration::fixtures::{upload, verify_as, vault, DOCTOR, NURSE, PATIENT};

    #[tokio::test(start_paused = true)]
    async fn test_second_grant_rejected_while_first_in_flight() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"scan").await;
        verify_as(&session, &backend, DOCTOR, id).await;
        session.toggle_selection(id).unwrap();
        backend.chain.set_latency(Duration::from_secs(3));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.grant_access(&["1"]).await })
        };
        while !session.is_busy(ActionKind::Grant) {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            session.grant_access(&["2"]).await.unwrap_err(),
            VaultError::ActionInProgress(ActionKind::Grant)
        );

        let grant = first.await.unwrap().unwrap();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].id, grant.id);
        assert!(!session.is_busy(ActionKind::Grant));
    }

    #[tokio::test(start_paused = true)]
    async fn test_different_actions_run_together() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"scan").await;
        backend.chain.set_latency(Duration::from_secs(1));

        let uploading = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .upload_document(b"second scan", DocumentType::LabResult)
                    .await
            })
        };
        while !session.is_busy(ActionKind::Upload) {
            tokio::task::yield_now().await;
        }

        // Proof generation does not touch the contract
        let proofs = session
            .generate_proofs(id, &[hc_03_claim_proofs::ClaimType::IsInsured])
            .await
            .unwrap();
        assert_eq!(proofs.len(), 1);

        let second = uploading.await.unwrap().unwrap();
        assert_eq!(second.owner, PATIENT);
        assert_eq!(session.documents().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_guard_released_after_failure() {
        let (session, backend) = vault();
        backend.chain.switch_to(Some(PATIENT));
        backend.chain.fail_next("user rejected transaction");

        assert!(session
            .upload_document(b"scan", DocumentType::Prescription)
            .await
            .is_err());
        assert!(!session.is_busy(ActionKind::Upload));
        assert!(session
            .upload_document(b"scan", DocumentType::Prescription)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_account_switch_mid_session_clears_selection() {
        let (session, backend) = vault();
        let id = upload(&session, &backend, b"scan").await;
        verify_as(&session, &backend, DOCTOR, id).await;
        session.toggle_selection(id).unwrap();

        let mut wallet = session.subscribe(EventFilter::topics(vec![EventTopic::Wallet]));
        let listener = session.spawn_wallet_listener();
        backend.chain.switch_to(Some(NURSE));

        let event = timeout(Duration::from_secs(1), wallet.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            event,
            VaultEvent::WalletChanged {
                account: Some(NURSE),
                ..
            }
        ));
        assert!(session.current_selection().is_empty());
        assert_eq!(session.document(id).unwrap().verified_by, Some(DOCTOR));
        listener.abort();
    }

    #[tokio::test]
    async fn test_network_change_is_published() {
        let (session, backend) = vault();
        let mut wallet = session.subscribe(EventFilter::topics(vec![EventTopic::Wallet]));
        let listener = session.spawn_wallet_listener();

        backend.chain.switch_network(42_220);

        let event = timeout(Duration::from_secs(1), wallet.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            event,
            VaultEvent::WalletChanged {
                account: None,
                chain_id: Some(42_220),
            }
        );
        listener.abort();
    }
}
