mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use nexus_dll::{Dll, DllBuilder, FixedDll, Key, Node, Storage};

/// Prints the list with a prefix loop and a postfix loop.
fn write_walks<W, T, S, K>(out: &mut W, list: &Dll<T, S, K>) -> io::Result<()>
where
    W: Write,
    T: core::fmt::Display,
    S: Storage<Node<T, K>, Key = K>,
    K: Key,
{
    writeln!(out, "Printing elements of the list via prefix advance")?;
    let mut cursor = list.begin();
    while cursor != list.end() {
        write!(out, "{} ", cursor.get())?;
        cursor.advance();
    }
    writeln!(out)?;

    writeln!(out, "Printing elements of the list via postfix advance")?;
    let mut cursor = list.begin();
    while cursor != list.end() {
        write!(out, "{} ", cursor.advance_postfix().get())?;
    }
    writeln!(out)
}

/// Head-inserts `values` until the arena runs out, returning how many fit.
fn fill_fixed(list: &mut FixedDll<u64>, values: &[u64]) -> usize {
    for (inserted, &value) in values.iter().enumerate() {
        if let Err(full) = list.try_insert_at_head(value) {
            log::warn!(
                "{full}: dropping {} after {} of {} values",
                full.0,
                inserted,
                values.len()
            );
            return inserted;
        }
    }
    values.len()
}

fn main() -> ExitCode {
    use env_logger::Env;
    env_logger::Builder::from_env(Env::default().filter_or("LOG", "nexus_dll_walk=info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    let mut out = io::stdout().lock();
    let written = match cli.fixed {
        None => {
            let mut list = DllBuilder::default().capacity(cli.values.len()).build();
            for &value in &cli.values {
                list.insert_at_head(value);
            }
            log::info!("built growable list of {} nodes", list.len());
            write_walks(&mut out, &list)
        }
        Some(capacity) => {
            let mut list = match DllBuilder::default()
                .fixed()
                .capacity(capacity)
                .build::<u64, u32>()
            {
                Ok(list) => list,
                Err(err) => {
                    log::error!("cannot build list: {err}");
                    return ExitCode::from(2);
                }
            };

            fill_fixed(&mut list, &cli.values);
            log::info!("built fixed list of {} / {} nodes", list.len(), list.capacity());
            write_walks(&mut out, &list)
        }
    };

    if let Err(err) = written {
        log::error!("cannot write output: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_dll::SlabDll;

    fn walks_of<T, S, K>(list: &Dll<T, S, K>) -> String
    where
        T: core::fmt::Display,
        S: Storage<Node<T, K>, Key = K>,
        K: Key,
    {
        let mut out = Vec::new();
        write_walks(&mut out, list).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn default_values_print_one_to_six_twice() {
        let mut list: SlabDll<u64> = SlabDll::new();
        for value in [6, 5, 4, 3, 2, 1] {
            list.insert_at_head(value);
        }

        assert_eq!(
            walks_of(&list),
            "Printing elements of the list via prefix advance\n\
             1 2 3 4 5 6 \n\
             Printing elements of the list via postfix advance\n\
             1 2 3 4 5 6 \n"
        );
    }

    #[test]
    fn empty_list_prints_headers_only() {
        let list: SlabDll<u64> = SlabDll::new();
        assert_eq!(
            walks_of(&list),
            "Printing elements of the list via prefix advance\n\n\
             Printing elements of the list via postfix advance\n\n"
        );
    }

    #[test]
    fn fixed_arena_stops_at_capacity() {
        let mut list: FixedDll<u64> = DllBuilder::default()
            .fixed()
            .capacity(3)
            .build()
            .unwrap();

        assert_eq!(fill_fixed(&mut list, &[6, 5, 4, 3, 2, 1]), 3);
        assert_eq!(list.len(), 3);
        assert!(walks_of(&list).contains("\n4 5 6 \n"));
    }

    #[test]
    fn fixed_arena_with_room_takes_everything() {
        let mut list: FixedDll<u64> = DllBuilder::default()
            .fixed()
            .capacity(8)
            .build()
            .unwrap();

        assert_eq!(fill_fixed(&mut list, &[2, 1]), 2);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }
}
