use criterion::{Criterion, black_box, criterion_group, criterion_main};

use chemform::{FormulaParser, ParserConfig, contains_only_elements, parse_formula, parse_moieties};

const FORMULAS: &[&str] = &[
    "H2O",
    "CaCO3",
    "Ca3Al2Si3O12",
    "Mg2SiO4",
    "(Mg0.88Fe0.12)2SiO4",
    "KAl3Si3O10(OH)2",
    "Fe|3|2O3",
    "Fe+2",
    "SO4-2",
    "Na/23/Cl",
    "/2/H2O",
    "Ca[Mg0.7Fe0.3]Si2O6",
    "NaAlSi3O8",
    "Al2Si2O5(OH)4",
    "Va2O",
    "Fe|3|+3",
];

const MOIETIES: &[&str] = &[
    "{Mg}2{Si}O4",
    "{Mg0.9Fe0.1}2{Si}O4",
    "{Ca}3{Al}2{Si}3O12",
    "{Na0.5Va0.5}{Al}Si3O8",
    "{Fe|3|0.4Al0.6}2{Mg}O4",
];

fn bench_parse_formula(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_formula");

    let formulas_1k: Vec<&str> = FORMULAS.iter().copied().cycle().take(1000).collect();

    group.bench_function("1k_formulas", |b| {
        b.iter(|| {
            for &formula in black_box(&formulas_1k) {
                let _ = parse_formula(formula);
            }
        })
    });

    let parser = FormulaParser::new(ParserConfig {
        max_symbol_len: 2,
        max_isotope_len: 3,
        max_valence_len: 2,
        max_depth: 8,
    });
    group.bench_function("1k_formulas_tight_limits", |b| {
        b.iter(|| {
            for &formula in black_box(&formulas_1k) {
                let _ = parser.parse(formula);
            }
        })
    });

    group.finish();
}

fn bench_parse_moieties(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_moieties");

    let moieties_1k: Vec<&str> = MOIETIES.iter().copied().cycle().take(1000).collect();

    group.bench_function("1k_formulas", |b| {
        b.iter(|| {
            for &formula in black_box(&moieties_1k) {
                let _ = parse_moieties(formula);
            }
        })
    });

    group.finish();
}

fn bench_element_check(c: &mut Criterion) {
    let allowed = ["Al", "Ca", "Fe", "H", "Mg", "Na", "O", "Si"];
    let formulas_1k: Vec<&str> = FORMULAS.iter().copied().cycle().take(1000).collect();

    c.bench_function("contains_only_elements/1k_formulas", |b| {
        b.iter(|| {
            for &formula in black_box(&formulas_1k) {
                let _ = contains_only_elements(formula, black_box(&allowed));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_parse_formula,
    bench_parse_moieties,
    bench_element_check
);
criterion_main!(benches);
