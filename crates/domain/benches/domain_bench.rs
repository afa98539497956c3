use chrono::{TimeDelta, Utc};
use common::{CustomerId, MovieId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Customer, EmailAddress, LicensingModel, Movie, PersonName};

fn customer_with_history(purchases: usize) -> Customer {
    let now = Utc::now();
    let mut customer = Customer::register(
        CustomerId::new(),
        PersonName::create("Bench Customer").unwrap(),
        EmailAddress::create("bench@example.com").unwrap(),
        now - TimeDelta::days(400),
    );
    for i in 0..purchases {
        let movie = Movie::new(MovieId::new(), format!("Movie {i}"), LicensingModel::TWO_DAYS);
        let at = now - TimeDelta::days((i % 400) as i64);
        customer.purchase_movie(&movie, at).unwrap();
    }
    customer
}

fn bench_purchase_movie(c: &mut Criterion) {
    let base = customer_with_history(1_000);
    let movie = Movie::new(MovieId::new(), "Fresh Release", LicensingModel::LIFE_LONG);

    c.bench_function("domain/purchase_movie_1000_history", |b| {
        b.iter(|| {
            let mut customer = base.clone();
            customer.purchase_movie(&movie, Utc::now()).unwrap();
        });
    });
}

fn bench_can_promote(c: &mut Criterion) {
    let customer = customer_with_history(1_000);

    c.bench_function("domain/can_promote_1000_history", |b| {
        b.iter(|| {
            let _ = customer.can_promote(Utc::now());
        });
    });
}

fn bench_replay(c: &mut Criterion) {
    let mut customer = customer_with_history(200);
    let events = customer.take_uncommitted_events();

    c.bench_function("domain/replay_200_events", |b| {
        b.iter(|| Customer::replay(events.clone()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_purchase_movie,
    bench_can_promote,
    bench_replay
);
criterion_main!(benches);
