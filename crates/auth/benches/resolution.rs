use criterion::{Criterion, black_box, criterion_group, criterion_main};

use retailgate_auth::{Permission, Role, UserAuthContext, allows, allows_all};

fn bench_resolution(c: &mut Criterion) {
    let defaults = UserAuthContext::new(Role::STAFF);
    let overridden = UserAuthContext::new(Role::CUSTOMER).with_override(
        retailgate_catalog::list_all()
            .iter()
            .map(|entry| entry.permission.clone()),
    );
    let every: Vec<Permission> = retailgate_catalog::list_all()
        .iter()
        .map(|entry| entry.permission.clone())
        .collect();

    c.bench_function("allows/role_defaults", |b| {
        b.iter(|| allows(black_box(&defaults), black_box("shipping.update")))
    });

    c.bench_function("allows/override", |b| {
        b.iter(|| allows(black_box(&overridden), black_box("shipping.update")))
    });

    c.bench_function("allows_all/full_catalog", |b| {
        b.iter(|| allows_all(black_box(&overridden), black_box(&every)))
    });
}

criterion_group!(benches, bench_resolution);
criterion_main!(benches);
