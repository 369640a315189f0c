use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;

use super::*;
use crate::error::{ClientError, GatewayError};

#[derive(Debug, Clone, Serialize)]
struct CustomerDraft {
    nom: String,
    telephone: String,
}

fn customer_form(draft: CustomerDraft) -> EntityForm<CustomerDraft> {
    EntityForm::new("clients", draft)
        .with_rule("nom", "le nom est obligatoire", |d| !d.nom.trim().is_empty())
        .with_rule("telephone", "le téléphone est obligatoire", |d| {
            !d.telephone.trim().is_empty()
        })
}

struct CountingGateway {
    calls: AtomicUsize,
    saved: Mutex<Vec<(String, Option<i64>, serde_json::Value)>>,
}

impl CountingGateway {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            saved: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl EntityGateway for CountingGateway {
    async fn save_new(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saved.lock().await.push((path.to_string(), None, body.clone()));
        Ok(body)
    }

    async fn save_existing(
        &self,
        path: &str,
        id: i64,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.saved
            .lock()
            .await
            .push((path.to_string(), Some(id), body.clone()));
        Ok(body)
    }
}

#[tokio::test]
async fn invalid_draft_collects_every_failure_and_skips_the_network() {
    let gateway = CountingGateway::new();
    let form = customer_form(CustomerDraft {
        nom: "  ".into(),
        telephone: String::new(),
    });

    let err = form.submit(&gateway).await.expect_err("invalid");
    match err {
        ClientError::Form(FormError::Invalid(messages)) => {
            assert_eq!(messages.len(), 2);
            assert!(messages[0].contains("nom"));
            assert!(messages[1].contains("telephone"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_draft_saves_as_create() {
    let gateway = CountingGateway::new();
    let form = customer_form(CustomerDraft {
        nom: "Épicerie du coin".into(),
        telephone: "0601020304".into(),
    });

    form.validate().expect("valid");
    form.submit(&gateway).await.expect("submit");

    let saved = gateway.saved.lock().await;
    let (path, id, body) = &saved[0];
    assert_eq!(path, "clients");
    assert_eq!(*id, None);
    assert_eq!(body["nom"], "Épicerie du coin");
}

#[tokio::test]
async fn edit_mode_saves_as_update_with_the_existing_id() {
    let gateway = CountingGateway::new();
    let form = customer_form(CustomerDraft {
        nom: "Épicerie du coin".into(),
        telephone: "0601020304".into(),
    })
    .editing(12);
    assert!(form.is_edit());

    form.submit(&gateway).await.expect("submit");
    let saved = gateway.saved.lock().await;
    assert_eq!(saved[0].1, Some(12));
}

#[test]
fn draft_mut_allows_in_place_edits() {
    let mut form = customer_form(CustomerDraft {
        nom: String::new(),
        telephone: "0601020304".into(),
    });
    assert!(form.validate().is_err());

    form.draft_mut().nom = "Supérette Nord".into();
    assert!(form.validate().is_ok());
    assert_eq!(form.draft().nom, "Supérette Nord");
}
