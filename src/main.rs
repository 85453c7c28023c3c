use conefield::{paint, Automaton, CausalModel, ComplexityConfig};

fn main() {
    env_logger::init();

    let width = 100;
    let rows = 100;
    let rule = 110;

    log::info!("conefield - statistical-complexity filter demo");
    log::info!("simulating rule {rule} on a {width}-wide toroidal lattice for {rows} rows");

    let mut ca = Automaton::new(rule, width).expect("valid lattice width");
    let mut rng = rand::thread_rng();
    ca.randomize(0.5, &mut rng);
    let spacetime = ca.evolve(rows).expect("valid evolution length");

    let config = ComplexityConfig::default();
    log::info!(
        "fitting causal states: depth={} spread={} threshold={}",
        config.depth,
        config.spread_rate,
        config.similarity_threshold
    );

    let model =
        CausalModel::fit(std::slice::from_ref(&spacetime), &config).expect("valid spacetime");
    log::info!(
        "{} causal states over {} distinct past signatures",
        model.num_states(),
        model.signature_count()
    );

    let complexity = paint(&spacetime, &model);
    let max = complexity.max_finite().unwrap_or(0.0);
    log::info!(
        "painted {}x{} complexity grid: max score {:.4}, {:.1}% unseen",
        complexity.height(),
        complexity.width(),
        max,
        complexity.unknown_fraction() * 100.0
    );

    // Coarse ASCII rendering: darker glyph = higher complexity.
    let glyphs = [' ', '.', ':', '+', '#'];
    for t in 0..complexity.height() {
        let line: String = (0..complexity.width())
            .map(|x| {
                let v = complexity.get(t, x);
                if !v.is_finite() {
                    '?'
                } else if max <= 0.0 {
                    ' '
                } else {
                    let bucket = ((v / max) * (glyphs.len() - 1) as f64).round() as usize;
                    glyphs[bucket.min(glyphs.len() - 1)]
                }
            })
            .collect();
        println!("{line}");
    }
}
