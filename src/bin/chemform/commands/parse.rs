use anyhow::Result;

use crate::cli::ParseArgs;
use crate::config::build_parser;
use crate::display::{Context, Progress, print_element_usage, print_run_summary, print_skipped};
use crate::io::write_compositions;

use super::{TOTAL_STEPS, load_formulas, parse_all, source_substep, write_output};

pub fn run_parse(args: ParseArgs, ctx: Context) -> Result<()> {
    let parser = build_parser(&args.limits)?;
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading formulas");
    let entries = load_formulas(&args.io)?;
    progress.complete_step(
        "Reading formulas",
        &[source_substep(&args.io, entries.len())],
    );

    progress.step_over("Parsing formulas", entries.len());
    let batch = parse_all(entries, args.io.keep_going, |text| {
        progress.tick();
        parser.parse(text)
    })?;
    progress.complete_step("Parsing formulas", &batch.substeps("compositions"));

    if ctx.interactive {
        let charged = batch
            .parsed
            .iter()
            .filter(|(_, comp)| comp.charge().is_some_and(|z| z != 0.0))
            .count();
        let isotopic = batch
            .parsed
            .iter()
            .filter(|(_, comp)| comp.iter().any(|t| t.isotope.is_some()))
            .count();
        print_run_summary(
            "Parse Summary",
            &[
                ("Parsed", batch.parsed.len().to_string()),
                ("Skipped", batch.failed.len().to_string()),
                ("Charged", charged.to_string()),
                ("With Isotopes", isotopic.to_string()),
            ],
        );
        print_element_usage(&batch.parsed);
    }

    progress.step("Writing output");
    let written = write_output(&args.io, |out| {
        write_compositions(out, &batch.parsed, args.io.format)
    })?;
    progress.complete_step("Writing output", &[written]);

    print_skipped(&batch.failed);
    progress.finish("Parsing complete");

    Ok(())
}
