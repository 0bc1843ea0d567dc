use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use convex_builtins::BuiltinRegistry;
use convex_tokenizer::{SyntaxKind, Tokenizer};

static FORMS: &str = r#"
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
(defn transfer ^{:doc "Moves funds."} [to amount & memo] (do (assert (> amount 0)) (#8/transfer to amount)))
"#;

static LITERALS: &str = r#"
1 -2 3. 4.5 .5 1e10 2.5E-3 ##NaN ##Inf ##-Inf #42 0xdeadbeef \a \newline A "str\n" :kw nil true false
1 -2 3. 4.5 .5 1e10 2.5E-3 ##NaN ##Inf ##-Inf #42 0xdeadbeef \a \newline A "str\n" :kw nil true false
1 -2 3. 4.5 .5 1e10 2.5E-3 ##NaN ##Inf ##-Inf #42 0xdeadbeef \a \newline A "str\n" :kw nil true false
1 -2 3. 4.5 .5 1e10 2.5E-3 ##NaN ##Inf ##-Inf #42 0xdeadbeef \a \newline A "str\n" :kw nil true false
"#;

static TRIVIA: &str = "
; comment line ; comment line ; comment line ; comment line ; comment line
a , b , c ,, d ; trailing
; comment line ; comment line ; comment line ; comment line ; comment line
a , b , c ,, d ; trailing
; comment line ; comment line ; comment line ; comment line ; comment line
a , b , c ,, d ; trailing
";

static CANDIDATES: [(&str, &str); 3] =
    [("forms", FORMS), ("literals", LITERALS), ("comments_and_commas", TRIVIA)];

fn iterate(s: &str, registry: &BuiltinRegistry) {
    let mut tokenizer = Tokenizer::new(s, registry);

    loop {
        let next_token = tokenizer.next_token();

        if next_token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(next_token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let registry = BuiltinRegistry::new(["*address*"], ["assert", "do", ">", "transfer"])
        .expect("disjoint builtin names");
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s, &registry)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
