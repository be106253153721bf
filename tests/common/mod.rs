use std::{
    fmt::Write as _,
    fs,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use heck::ToTitleCase;
use inventory::collect;
use libtest_mimic::{Arguments, Conclusion, Failed, Trial};

/// The dumps produced by every case, grouped by case name.
static DUMPED: Mutex<Vec<(&str, Vec<(&str, String)>)>> = Mutex::new(Vec::new());
pub const OUTPUT_DIR: &str = env!("CARGO_TARGET_TMPDIR");

pub struct TestCase {
    pub name: &'static str,
    pub test: fn() -> Result<(), Failed>,
}
collect!(TestCase);

pub fn test() -> Conclusion {
    let args = Arguments::from_args();
    let tests = inventory::iter::<TestCase>
        .into_iter()
        .map(|TestCase { name, test }| Trial::test(*name, test))
        .collect::<Vec<_>>();
    libtest_mimic::run(&args, tests)
}

/// Parse every input, compare its dump to the expected one, and record the dumps for the report.
pub fn check(name: &'static str, cases: &[(&'static str, &'static str)]) -> Result<(), Failed> {
    let mut dumps = Vec::with_capacity(cases.len());
    let mut failures = String::new();
    for &(input, expected) in cases {
        let dump = latex_ast::parse(input).to_string();
        if dump != expected {
            writeln!(failures, "input:    {input}\nexpected: {expected}\nfound:    {dump}")
                .expect("writing to a string cannot fail");
        }
        dumps.push((input, dump));
    }
    DUMPED.lock().unwrap().push((name, dumps));

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.into())
    }
}

/// Write every recorded dump to a markdown report, returning its path.
pub fn report(file_name: &str, title: &str) -> io::Result<PathBuf> {
    let mut out = format!("# {title}\n");
    let mut dumped = DUMPED.lock().unwrap();
    dumped.sort();
    for (name, rows) in dumped.iter() {
        let _ = write!(
            out,
            "\n## {}\n\n| Input | Tree |\n|---|---|\n",
            name.to_title_case()
        );
        for (input, dump) in rows {
            let _ = writeln!(
                out,
                "| `{}` | `{}` |",
                input.replace('|', r"\|"),
                dump.replace('|', r"\|")
            );
        }
    }
    let path = Path::new(OUTPUT_DIR).join(file_name);
    fs::write(&path, out)?;
    Ok(path)
}

/// Register a corpus case: each input must dump to the expected tree.
#[macro_export]
macro_rules! corpus {
    ($name:ident, $($input:literal => $expected:literal),+ $(,)?) => {
        pub fn $name() -> Result<(), libtest_mimic::Failed> {
            $crate::common::check(stringify!($name), &[$(($input, $expected)),+])
        }

        inventory::submit! {
            $crate::common::TestCase {
                name: stringify!($name),
                test: $name
            }
        }
    };
}
