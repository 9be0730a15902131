use anyhow::Result;

use chemform::parse_moieties;

use crate::cli::MoietyArgs;
use crate::display::{Context, Progress, print_moiety_usage, print_run_summary, print_skipped};
use crate::io::write_moieties;

use super::{TOTAL_STEPS, load_formulas, parse_all, source_substep, write_output};

pub fn run_moiety(args: MoietyArgs, ctx: Context) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading moiety formulas");
    let entries = load_formulas(&args.io)?;
    progress.complete_step(
        "Reading moiety formulas",
        &[source_substep(&args.io, entries.len())],
    );

    progress.step_over("Parsing site occupancies", entries.len());
    let batch = parse_all(entries, args.io.keep_going, |text| {
        progress.tick();
        parse_moieties(text)
    })?;
    progress.complete_step("Parsing site occupancies", &batch.substeps("site lists"));

    if ctx.interactive {
        let terms: usize = batch.parsed.iter().map(|(_, m)| m.terms().len()).sum();
        let vacancies = batch
            .parsed
            .iter()
            .flat_map(|(_, m)| m.terms())
            .filter(|t| t.is_vacancy())
            .count();
        let max_sites = batch
            .parsed
            .iter()
            .map(|(_, m)| m.site_count())
            .max()
            .unwrap_or(0);
        print_run_summary(
            "Moiety Summary",
            &[
                ("Parsed", batch.parsed.len().to_string()),
                ("Skipped", batch.failed.len().to_string()),
                ("Moiety Terms", terms.to_string()),
                ("Vacancies", vacancies.to_string()),
                ("Most Sites", max_sites.to_string()),
            ],
        );
        print_moiety_usage(&batch.parsed);
    }

    progress.step("Writing output");
    let written = write_output(&args.io, |out| {
        write_moieties(out, &batch.parsed, args.io.format)
    })?;
    progress.complete_step("Writing output", &[written]);

    print_skipped(&batch.failed);
    progress.finish("Moiety parsing complete");

    Ok(())
}
