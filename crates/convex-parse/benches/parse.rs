use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use convex_builtins::BuiltinRegistry;

fn benchmark_parser(c: &mut Criterion) {
    let registry = BuiltinRegistry::new(["*address*", "*caller*"], ["+", "-", "=", "count", "inc"])
        .expect("disjoint builtin names");

    let inputs = [
        (
            "Simple",
            r#"
            (def x 42)
            "#,
        ),
        (
            "Medium",
            r#"
            (defn fib ^{:doc "Naive fibonacci."}
              ([] 0)
              ([n & _]
               (cond (= n 0) 0
                     (= n 1) 1
                     (+ (fib (- n 1)) (fib (- n 2))))))

            (let [a {:x 1, :y [1 2 3]}
                  b #{:p :q}]
              (if-let [v (lookup #8 registry)]
                `(~a ~b ~v)
                'nothing))

            (dotimes [i 10] (#8/log *caller* i))
            "#,
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, code) in inputs {
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), &code, |b, &code| {
            b.iter(|| {
                let parse = convex_parse::parse(code, &registry);
                black_box(parse);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
