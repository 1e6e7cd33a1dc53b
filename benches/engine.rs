use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use storeplan::logging::{LogEvent, LogSink, Logger, LoggingResult};
use storeplan::{
    Aisle, DropTarget, FeatureType, LayoutEngine, Product, Side, Slot, StoreFeature, serialize,
};

#[derive(Clone, Default)]
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

const SPOTS: usize = 36;

fn build_engine() -> LayoutEngine {
    let mut engine = LayoutEngine::new(SPOTS);
    {
        let config = engine.config_mut();
        config.logger = Some(Logger::new(NullSink));
        config.enable_metrics();
    }

    for n in 0..SPOTS {
        engine.add_aisle(Aisle {
            id: format!("aisle-{n}"),
            name: format!("Aisle {n}"),
            color: "#8ecae6".into(),
        });
    }
    for n in 0..4 {
        engine.add_feature(StoreFeature {
            id: format!("feat-{n}"),
            name: format!("Checkout {n}"),
            feature_type: FeatureType::Checkout,
            emoji: "🛒".into(),
            color: "#ffb703".into(),
        });
    }
    for n in 0..120 {
        engine.add_product(Product {
            id: format!("prod-{n}"),
            name: format!("Product {n}"),
            price: 0.5 + n as f64,
        });
    }
    engine
}

fn drag_storm(engine: &mut LayoutEngine) {
    for n in 0..SPOTS {
        engine.begin_drag(&format!("aisle-{n}")).expect("drag");
        engine
            .drop_at(DropTarget::Slot(Slot::Interior(n)))
            .expect("drop");
    }
    for n in 0..4 {
        engine.begin_drag(&format!("feat-{n}")).expect("drag");
        engine
            .drop_at(DropTarget::Slot(Slot::border(Side::Top, n)))
            .expect("drop");
    }
    for n in 0..120 {
        engine.begin_drag(&format!("prod-{n}")).expect("drag");
        engine
            .drop_at(DropTarget::Aisle(format!("aisle-{}", n % SPOTS)))
            .expect("drop");
    }
    // Shuffle pass: every aisle trades with its neighbor.
    for n in 0..SPOTS {
        engine.begin_drag(&format!("aisle-{n}")).expect("drag");
        engine
            .drop_at(DropTarget::Slot(Slot::Interior((n + 1) % SPOTS)))
            .expect("drop");
    }
}

fn engine_drag_storm(c: &mut Criterion) {
    c.bench_function("engine_drag_storm", |b| {
        b.iter(|| {
            let mut engine = build_engine();
            drag_storm(black_box(&mut engine));
            engine.emit_metrics();
        });
    });
}

fn engine_serialize(c: &mut Criterion) {
    let mut engine = build_engine();
    drag_storm(&mut engine);
    c.bench_function("engine_serialize", |b| {
        b.iter(|| black_box(serialize(&engine)));
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().measurement_time(Duration::from_secs(5))
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = engine_drag_storm, engine_serialize
}
criterion_main!(benches);
