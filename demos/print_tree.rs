use std::io::Read;

use anyhow::Context;
use latex_ast::parse;

static LATEX: &str = r"\sum_{i=1}^{n} \frac{1}{i^2} \quad \ce{2H2 + O2 -> 2H2O}";

/// Print the tree of the markup given as arguments, read from stdin with `-`, or of a sample.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = match args.as_slice() {
        [] => LATEX.to_owned(),
        [dash] if dash == "-" => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("could not read the markup from stdin")?;
            input
        }
        args => args.join(" "),
    };

    let tree = parse(&input);
    println!("{tree}");
    println!("{tree:#?}");
    Ok(())
}
