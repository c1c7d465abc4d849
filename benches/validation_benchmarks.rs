//! Performance benchmarks for contact validation.
//!
//! These benchmarks measure:
//! - Email and phone syntax checks in isolation
//! - Full validation against stores of different sizes
//! - Accepted versus rejected submissions

use contact_book::domain::{is_valid_email, MobileLocale};
use contact_book::models::{Contact, ProposedContact};
use contact_book::repositories::InMemoryContactRepository;
use contact_book::validation::{ContactValidator, ValidationMode};
use contact_book::ContactId;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

fn seeded_store(size: usize) -> InMemoryContactRepository {
    let contacts = (0..size)
        .map(|i| {
            Contact::from_proposed(
                ContactId::generate(),
                ProposedContact::new(
                    format!("Contact {}", i),
                    format!("contact{}@example.com", i),
                    format!("0812{:08}", i),
                ),
            )
        })
        .collect();
    InMemoryContactRepository::with_contacts(contacts, false)
}

fn bench_syntax_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("syntax");

    group.bench_function("email_valid", |b| {
        b.iter(|| is_valid_email(black_box("ana.lestari+work@mail.example.co.id")))
    });
    group.bench_function("email_invalid", |b| {
        b.iter(|| is_valid_email(black_box("ana.lestari@@example")))
    });
    group.bench_function("phone_id_id", |b| {
        b.iter(|| MobileLocale::IdId.matches(black_box("+6281234567890")))
    });

    group.finish();
}

fn bench_validate_by_store_size(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let validator = ContactValidator::default();
    let mut group = c.benchmark_group("validate_create");

    for size in [10, 1_000, 10_000] {
        let store = seeded_store(size);

        group.bench_with_input(BenchmarkId::new("accepted", size), &size, |b, _| {
            b.to_async(&rt).iter(|| async {
                let proposed = ProposedContact::new("Newcomer", "new@example.com", "081299998888");
                validator
                    .validate(proposed, &ValidationMode::Create, &store)
                    .await
                    .unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("duplicate", size), &size, |b, &size| {
            let taken = format!("Contact {}", size - 1);
            b.to_async(&rt).iter(|| async {
                let proposed = ProposedContact::new(taken.as_str(), "not-an-email", "123");
                validator
                    .validate(proposed, &ValidationMode::Create, &store)
                    .await
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_syntax_checks, bench_validate_by_store_size);
criterion_main!(benches);
