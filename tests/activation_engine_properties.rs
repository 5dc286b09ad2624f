//! Property tests for notification-driven activation.
//!
//! Each property runs the real `ActivationEngine` against in-memory accounts
//! and the mock gateway. The concurrency tests at the end race deliveries on
//! a multi-threaded runtime.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;

use premix_signup::adapters::memory::InMemoryAccountRepository;
use premix_signup::adapters::mercadopago::MockPaymentGateway;
use premix_signup::application::handlers::{RegisterAccountCommand, RegisterAccountHandler};
use premix_signup::application::ActivationEngine;
use premix_signup::domain::account::{
    Account, AccountError, ActivationOutcome, DuplicateField, Email, NationalId, PasswordHash,
    Username,
};
use premix_signup::domain::billing::{
    CreatedPreference, GatewayPayment, MerchantOrder, NotificationPayload, OrderPayment,
    PaymentStatus,
};
use premix_signup::domain::foundation::{AccountId, DomainError};
use premix_signup::ports::{
    AccountRepository, CredentialHasher, NotificationOutcome, NotificationProcessor,
    PaymentOutcome,
};

// ════════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════════

const NATIONAL_IDS: [&str; 4] = ["52998224725", "11144477735", "39053344705", "86288366757"];

struct World {
    accounts: Arc<InMemoryAccountRepository>,
    gateway: MockPaymentGateway,
    engine: ActivationEngine,
    ids: Vec<AccountId>,
}

async fn world(account_count: usize) -> World {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let mut ids = Vec::with_capacity(account_count);
    for (i, national_id) in NATIONAL_IDS.iter().take(account_count).enumerate() {
        let account = Account::register(
            Username::new(&format!("user{i}")).unwrap(),
            Email::new(&format!("user{i}@premix.test")).unwrap(),
            NationalId::new(national_id).unwrap(),
            PasswordHash::from_phc("$argon2id$stub"),
        );
        accounts.create(&account).await.unwrap();
        ids.push(account.id());
    }

    let gateway = MockPaymentGateway::new();
    let engine = ActivationEngine::new(accounts.clone(), Arc::new(gateway.clone()));
    World {
        accounts,
        gateway,
        engine,
        ids,
    }
}

impl World {
    async fn active_ids(&self) -> HashSet<AccountId> {
        self.accounts
            .list()
            .await
            .unwrap()
            .into_iter()
            .filter(|a| a.is_active())
            .map(|a| a.id())
            .collect()
    }
}

fn payment(id: &str, status: PaymentStatus, reference: Option<String>) -> GatewayPayment {
    GatewayPayment {
        id: id.to_string(),
        status,
        status_detail: None,
        external_reference: reference,
        transaction_amount: Some(15.0),
    }
}

fn payment_notification(id: &str) -> NotificationPayload {
    NotificationPayload::Payment { id: id.to_string() }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn non_approved_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Pending),
        Just(PaymentStatus::InProcess),
        Just(PaymentStatus::Authorized),
        Just(PaymentStatus::InMediation),
        Just(PaymentStatus::Rejected),
        Just(PaymentStatus::Cancelled),
        Just(PaymentStatus::Refunded),
        Just(PaymentStatus::ChargedBack),
        "[a-z_]{3,12}"
            .prop_filter("not approved", |s| s != "approved")
            .prop_map(|s| PaymentStatus::parse(&s)),
    ]
}

struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, DomainError> {
        Ok(PasswordHash::from_phc(format!("plain${plain}")))
    }

    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, DomainError> {
        Ok(hash.as_str() == format!("plain${plain}"))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Properties
// ════════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn activation_is_idempotent_under_redelivery(deliveries in 1usize..6) {
        block_on(async {
            let w = world(1).await;
            let reference = w.ids[0].to_string();
            w.gateway.set_payment(payment("PAY1", PaymentStatus::Approved, Some(reference)));

            let mut activated = 0;
            for _ in 0..deliveries {
                let outcome = w.engine.process(&payment_notification("PAY1")).await.unwrap();
                activated += outcome.activations();
            }

            assert_eq!(activated, 1);
            assert_eq!(w.active_ids().await.len(), 1);
        });
    }

    #[test]
    fn non_approved_payments_never_activate(status in non_approved_status()) {
        block_on(async {
            let w = world(1).await;
            let reference = w.ids[0].to_string();
            w.gateway.set_payment(payment("PAY2", status.clone(), Some(reference)));

            let outcome = w.engine.process(&payment_notification("PAY2")).await.unwrap();

            assert_eq!(outcome.activations(), 0);
            assert_eq!(outcome.awaiting_approval(), status.may_still_approve());
            assert!(w.active_ids().await.is_empty());
        });
    }

    #[test]
    fn paid_order_activates_exactly_the_approved_references(
        entries in proptest::collection::vec((0usize..4, any::<bool>()), 1..6)
    ) {
        block_on(async {
            let w = world(4).await;
            let mut expected = HashSet::new();
            let mut order_payments = Vec::new();

            for (i, (account, approved)) in entries.iter().enumerate() {
                let id = format!("PAY{i}");
                let status = if *approved { PaymentStatus::Approved } else { PaymentStatus::Rejected };
                if *approved {
                    expected.insert(w.ids[*account]);
                }
                w.gateway.set_payment(payment(&id, status, Some(w.ids[*account].to_string())));
                order_payments.push(OrderPayment { id, status: None });
            }

            w.gateway.set_order(MerchantOrder {
                id: "ORD1".to_string(),
                order_status: "paid".to_string(),
                paid_amount: 100.0,
                total_amount: 100.0,
                payments: order_payments,
            });

            let outcome = w
                .engine
                .process(&NotificationPayload::MerchantOrder { order_id: "ORD1".to_string() })
                .await
                .unwrap();

            assert_eq!(outcome.activations(), expected.len());
            assert_eq!(w.active_ids().await, expected);
        });
    }

    #[test]
    fn unpaid_order_examines_no_payment(paid in 0.0f64..99.0) {
        block_on(async {
            let w = world(1).await;
            w.gateway.set_payment(payment("PAY1", PaymentStatus::Approved, Some(w.ids[0].to_string())));
            w.gateway.set_order(MerchantOrder {
                id: "ORD2".to_string(),
                order_status: "payment_in_process".to_string(),
                paid_amount: paid,
                total_amount: 100.0,
                payments: vec![OrderPayment { id: "PAY1".to_string(), status: None }],
            });

            let outcome = w
                .engine
                .process(&NotificationPayload::MerchantOrder { order_id: "ORD2".to_string() })
                .await
                .unwrap();

            assert!(matches!(outcome, NotificationOutcome::OrderNotPaid { .. }));
            assert_eq!(w.gateway.call_count("get_payment"), 0);
            assert!(w.active_ids().await.is_empty());
        });
    }

    #[test]
    fn blank_reference_is_skipped(reference in prop_oneof![Just(None), "[ \t]{0,4}".prop_map(Some)]) {
        block_on(async {
            let w = world(1).await;
            w.gateway.set_payment(payment("PAY3", PaymentStatus::Approved, reference));

            let outcome = w.engine.process(&payment_notification("PAY3")).await.unwrap();

            assert_eq!(
                outcome,
                NotificationOutcome::Payments(vec![PaymentOutcome::MissingExternalReference {
                    payment_id: "PAY3".to_string(),
                }])
            );
            assert!(w.active_ids().await.is_empty());
        });
    }

    #[test]
    fn unknown_reference_creates_nothing(reference in "[a-zA-Z0-9-]{1,40}") {
        block_on(async {
            let w = world(1).await;
            w.gateway.set_payment(payment("PAY4", PaymentStatus::Approved, Some(reference)));

            let outcome = w.engine.process(&payment_notification("PAY4")).await.unwrap();

            let NotificationOutcome::Payments(outcomes) = outcome else {
                panic!("expected payment outcomes");
            };
            assert!(matches!(
                outcomes.as_slice(),
                [PaymentOutcome::Applied { activation: ActivationOutcome::AccountNotFound, .. }]
            ));
            assert_eq!(w.accounts.list().await.unwrap().len(), 1);
            assert!(w.active_ids().await.is_empty());
        });
    }

    #[test]
    fn reformatted_identity_fields_still_collide(
        pad_left in "[ ]{0,3}",
        pad_right in "[ ]{0,3}",
        upper in any::<bool>(),
    ) {
        block_on(async {
            let accounts = Arc::new(InMemoryAccountRepository::new());
            let handler = RegisterAccountHandler::new(accounts.clone(), Arc::new(PlainHasher));
            handler
                .handle(RegisterAccountCommand {
                    username: "joao".to_string(),
                    email: "joao@premix.test".to_string(),
                    national_id: "52998224725".to_string(),
                    password: "segredo123".to_string(),
                })
                .await
                .unwrap();

            let email = if upper { "JOAO@PREMIX.TEST" } else { "joao@premix.test" };
            let err = handler
                .handle(RegisterAccountCommand {
                    username: "maria".to_string(),
                    email: format!("{pad_left}{email}{pad_right}"),
                    national_id: "11144477735".to_string(),
                    password: "segredo123".to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err, AccountError::duplicate(DuplicateField::Email));

            let err = handler
                .handle(RegisterAccountCommand {
                    username: "maria".to_string(),
                    email: "maria@premix.test".to_string(),
                    national_id: format!("{pad_left}529.982.247-25{pad_right}"),
                    password: "segredo123".to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err, AccountError::duplicate(DuplicateField::NationalId));

            assert_eq!(accounts.list().await.unwrap().len(), 1);
        });
    }

    #[test]
    fn sandbox_checkout_url_is_preferred(
        sandbox in proptest::option::of("https://sandbox\\.test/[a-z0-9]{1,8}"),
        production in proptest::option::of("https://www\\.test/[a-z0-9]{1,8}"),
    ) {
        let created = CreatedPreference {
            id: "pref".to_string(),
            init_point: production.clone(),
            sandbox_init_point: sandbox.clone(),
        };

        let expected = sandbox.or(production);
        prop_assert_eq!(created.checkout_url(), expected.as_deref());
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Concurrent delivery
// ════════════════════════════════════════════════════════════════════════════════

const CONCURRENT_DELIVERIES: usize = 16;

/// Delivers payment and merchant-order notifications for the same approved
/// payment in parallel and returns the total activations reported.
async fn deliver_concurrently(engine: &Arc<ActivationEngine>) -> usize {
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..CONCURRENT_DELIVERIES {
        let engine = engine.clone();
        let notification = if i % 2 == 0 {
            payment_notification("PAY1")
        } else {
            NotificationPayload::MerchantOrder {
                order_id: "ORD1".to_string(),
            }
        };
        tasks.spawn(async move { engine.process(&notification).await });
    }

    let mut activations = 0;
    while let Some(joined) = tasks.join_next().await {
        activations += joined.unwrap().unwrap().activations();
    }
    activations
}

fn paid_order(payment_id: &str) -> MerchantOrder {
    MerchantOrder {
        id: "ORD1".to_string(),
        order_status: "paid".to_string(),
        paid_amount: 15.0,
        total_amount: 15.0,
        payments: vec![OrderPayment {
            id: payment_id.to_string(),
            status: None,
        }],
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deliveries_activate_exactly_once() {
    let w = world(1).await;
    let account_id = w.ids[0];
    w.gateway
        .set_payment(payment("PAY1", PaymentStatus::Approved, Some(account_id.to_string())));
    w.gateway.set_order(paid_order("PAY1"));
    let engine = Arc::new(w.engine);

    assert_eq!(deliver_concurrently(&engine).await, 1);

    let first = w
        .accounts
        .find_by_id(&account_id)
        .await
        .unwrap()
        .unwrap();
    assert!(first.is_active());
    let activated_at = first.activated_at();
    assert!(activated_at.is_some());

    assert_eq!(deliver_concurrently(&engine).await, 0);

    let second = w
        .accounts
        .find_by_id(&account_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.activated_at(), activated_at);
    assert_eq!(w.accounts.list().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_deliveries_for_distinct_accounts_activate_each_once() {
    let w = world(4).await;
    for (i, id) in w.ids.iter().enumerate() {
        w.gateway.set_payment(payment(
            &format!("PAY{i}"),
            PaymentStatus::Approved,
            Some(id.to_string()),
        ));
    }
    let engine = Arc::new(w.engine);

    let mut tasks = tokio::task::JoinSet::new();
    for round in 0..4 {
        for i in 0..w.ids.len() {
            let engine = engine.clone();
            let notification = payment_notification(&format!("PAY{}", (i + round) % 4));
            tasks.spawn(async move { engine.process(&notification).await });
        }
    }

    let mut activations = 0;
    while let Some(joined) = tasks.join_next().await {
        activations += joined.unwrap().unwrap().activations();
    }

    assert_eq!(activations, w.ids.len());
    let active: HashSet<AccountId> = w
        .accounts
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.is_active())
        .map(|a| a.id())
        .collect();
    assert_eq!(active, w.ids.iter().copied().collect());
}
