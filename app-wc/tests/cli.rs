use std::{
    collections::HashMap,
    io::Write,
    process::{Command, Output, Stdio},
};

fn wordcount(args: &[&str], input: impl AsRef<[u8]>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_wordcount"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // usage errors exit without reading stdin
    let _ = child.stdin.take().unwrap().write_all(input.as_ref());
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> &str {
    assert!(output.status.success(), "{:?}", output);
    std::str::from_utf8(&output.stdout).unwrap()
}

#[test]
fn map() {
    let output = wordcount(&["map"], "the cat sat\n");
    assert_eq!(stdout(&output), "the\t1\ncat\t1\nsat\t1\n");
}

#[test]
fn reduce() {
    let output = wordcount(&["reduce"], "the\t1\nthe\t1\ncat\t1\n");
    assert_eq!(stdout(&output), "the\t2\ncat\t1\n");
}

#[test]
fn reduce_regroup() {
    let output = wordcount(&["reduce", "--regroup"], "the\t1\ncat\t1\nthe\t1\n");
    assert_eq!(stdout(&output), "cat\t1\nthe\t2\n");
}

#[test]
fn empty_input() {
    for mode in &["map", "reduce"] {
        let output = wordcount(&[*mode], "");
        assert_eq!(stdout(&output), "");
        assert!(output.stderr.is_empty());
    }
}

#[test]
fn no_help_on_stdout() {
    for args in &[&["--help"][..], &["-h"][..], &["--version"][..], &["map", "--help"][..]] {
        let output = wordcount(args, "");
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("USAGE"));
    }
}

#[test]
fn usage() {
    for args in &[&[][..], &["foo"][..]] {
        let output = wordcount(args, "");
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("USAGE"));
    }
}

#[test]
fn bad_count() {
    let output = wordcount(&["reduce"], "the\tmany\n");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("many"));
}

#[test]
fn pipeline() {
    let text = "It was the best of times, it was the worst of times;\n\
                it was the age of wisdom...\n\
                \n\
                THE_END the end.\n";

    let mapped = wordcount(&["map"], text);
    // stand-in for the shuffle: sorting makes equal words contiguous
    let mut shuffled: Vec<_> = stdout(&mapped).lines().collect();
    shuffled.sort_unstable();
    let shuffled = shuffled.iter().map(|l| format!("{}\n", l)).collect::<String>();

    let reduced = wordcount(&["reduce"], &shuffled);
    let counts: HashMap<_, _> = stdout(&reduced)
        .lines()
        .map(|line| {
            let (word, count) = line.split_once('\t').unwrap();
            (word.to_owned(), count.parse::<u64>().unwrap())
        })
        .collect();

    assert_eq!(counts.len(), stdout(&reduced).lines().count());
    assert_eq!(counts["it"], 3);
    assert_eq!(counts["was"], 3);
    assert_eq!(counts["the"], 4);
    assert_eq!(counts["of"], 3);
    assert_eq!(counts["times"], 2);
    assert_eq!(counts["the_end"], 1);
    assert_eq!(counts["end"], 1);
    assert_eq!(counts.values().sum::<u64>(), 21);
}

#[test]
fn extra_arguments() {
    let output = wordcount(&["map", "extra"], "a b\n");
    assert_eq!(stdout(&output), "a\t1\nb\t1\n");
}

#[test]
fn map_latin1() {
    let output = wordcount(&["map"], b"caf\xe9 ok\n");
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(output.stdout, b"caf\t1\nok\t1\n");
}
