use anyhow::{bail, Result};
use clap::Parser;
use labmap::{
    config::{FileConfig, LabSelection, ProductSelection},
    enrich_products,
    report::{render_diagnostics, render_preview},
    table::{column_names, read_csv_table, write_csv_table},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_OUTPUT: &str = "produits_mis_a_jour.csv";

/// Fill the company column of a products CSV from a labs CSV.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Labs CSV (lab id, lab name, company id)
    #[arg(long)]
    labs: PathBuf,

    /// Products CSV (product id, company, lab id)
    #[arg(long)]
    products: PathBuf,

    /// YAML file with the column selection
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the columns of both files and exit
    #[arg(long)]
    list_columns: bool,

    #[arg(long)]
    lab_id_col: Option<String>,
    #[arg(long)]
    lab_name_col: Option<String>,
    #[arg(long)]
    entreprise_id_col: Option<String>,

    #[arg(long)]
    product_id_col: Option<String>,
    /// Column to fill with the company id
    #[arg(long)]
    product_entreprise_col: Option<String>,
    #[arg(long)]
    product_lab_col: Option<String>,

    /// Where to write the enriched products CSV [default: produits_mis_a_jour.csv]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rows of the result to print, 0 to disable
    #[arg(long, default_value_t = 20)]
    preview: usize,

    /// Exit with an error when some lab ids could not be resolved
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let labs = read_csv_table(&args.labs)?;
    let products = read_csv_table(&args.products)?;

    if args.list_columns {
        println!("{}: {}", args.labs.display(), column_names(&labs).join(", "));
        println!(
            "{}: {}",
            args.products.display(),
            column_names(&products).join(", ")
        );
        return Ok(());
    }

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let lab_columns = LabSelection {
        id: args.lab_id_col,
        name: args.lab_name_col,
        entreprise_id: args.entreprise_id_col,
    }
    .or(file_config.labs)
    .into_columns()?;
    let product_columns = ProductSelection {
        id: args.product_id_col,
        entreprise: args.product_entreprise_col,
        lab_id: args.product_lab_col,
    }
    .or(file_config.products)
    .into_columns()?;

    let (enriched, diagnostics) =
        enrich_products(&labs, &lab_columns, &products, &product_columns)?;

    let output = args
        .output
        .or(file_config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    write_csv_table(&enriched, &output, b',')?;
    info!(path = %output.display(), rows = enriched.num_rows(), "wrote enriched products");

    if args.preview > 0 {
        println!("{}", render_preview(&enriched, args.preview)?);
    }
    print!("{}", render_diagnostics(&diagnostics));

    if args.strict && diagnostics.has_errors() {
        bail!(
            "{} product row(s) reference a lab id with no known company",
            diagnostics.errors.len()
        );
    }
    Ok(())
}
