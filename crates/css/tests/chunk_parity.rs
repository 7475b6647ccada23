//! Chunk-independence coverage: any partition of the input must yield the
//! token stream of the whole input. Deterministic plans (fixed sizes plus
//! boundary-aware splits) are complemented by seeded fuzz plans so CI runs
//! stay reproducible.

use css::{CssTokenizer, TokenizerConfig, describe};

const CASES: [&str; 10] = [
    "a { color: #FF0099; }",
    "url( foo ) url(\"bar\") url(ba'd) tail",
    "10px -3.5e+2 .5% \\41 BC",
    "<!-- x --> /* comment */ y -->",
    "\"str\\69ng\" 'other' \"broken\nnext",
    "@-webkit-keyframes spin{from{transform:rotate(0)}}",
    "line\r\nnext\rlast\x0Cend",
    "#-\\ @\\ --prop: var(--x);",
    "1e+ 2. 3-x 4\\41 5%",
    "cal\\63 (url(a\\29 b))",
];

const FIXED_SIZES: [usize; 8] = [1, 2, 3, 4, 8, 16, 32, 64];
const FUZZ_RUNS: usize = 16;
const FUZZ_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Token stream plus recorded error kinds; the full observable surface.
fn fingerprint(tokenizer: &CssTokenizer) -> Vec<String> {
    let mut out: Vec<String> = tokenizer
        .tokens()
        .iter()
        .map(|t| format!("{} {}", t.origin(), describe(&t)))
        .collect();
    out.extend(
        tokenizer
            .errors()
            .iter()
            .map(|e| format!("error: {} at {}", e.kind.message(), e.diagnostic.position)),
    );
    out
}

fn run_whole(input: &str) -> Vec<String> {
    let mut tokenizer = CssTokenizer::new(TokenizerConfig::default());
    tokenizer.push_str(input).unwrap();
    tokenizer.finish().unwrap();
    fingerprint(&tokenizer)
}

/// Tokenize `input` split at the given code-point boundaries.
fn run_chunked(input: &str, boundaries: &[usize]) -> Vec<String> {
    let code_points: Vec<char> = input.chars().collect();
    let mut tokenizer = CssTokenizer::new(TokenizerConfig::default());
    let mut at = 0;
    for &boundary in boundaries {
        let chunk: String = code_points[at..boundary].iter().collect();
        tokenizer.push_str(&chunk).unwrap();
        at = boundary;
    }
    let tail: String = code_points[at..].iter().collect();
    tokenizer.push_str(&tail).unwrap();
    tokenizer.finish().unwrap();
    fingerprint(&tokenizer)
}

fn fixed_plan(len: usize, size: usize) -> Vec<usize> {
    (1..len).filter(|i| i % size == 0).collect()
}

/// Split right before and after every token-boundary-ish code point.
fn boundary_plan(input: &str) -> Vec<usize> {
    let mut plan = Vec::new();
    for (index, ch) in input.chars().enumerate() {
        if matches!(
            ch,
            '\\' | '"' | '\'' | '(' | ')' | '-' | '*' | '/' | '\n' | '\r'
        ) {
            plan.push(index);
            plan.push(index + 1);
        }
    }
    let len = input.chars().count();
    plan.retain(|&i| i > 0 && i < len);
    plan.sort_unstable();
    plan.dedup();
    plan
}

/// Minimal LCG for reproducible fuzz plans.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn advance(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 16
    }

    fn gen_range(&mut self, bound: usize) -> usize {
        (self.advance() % bound as u64) as usize
    }
}

fn fuzz_plan(rng: &mut Lcg, len: usize) -> Vec<usize> {
    if len < 2 {
        return Vec::new();
    }
    let cuts = 1 + rng.gen_range(len.min(9));
    let mut plan: Vec<usize> = (0..cuts).map(|_| 1 + rng.gen_range(len - 1)).collect();
    plan.sort_unstable();
    plan.dedup();
    plan
}

#[test]
fn fixed_size_chunking_is_equivalent() {
    for input in CASES {
        let whole = run_whole(input);
        let len = input.chars().count();
        for size in FIXED_SIZES {
            let plan = fixed_plan(len, size);
            assert_eq!(
                run_chunked(input, &plan),
                whole,
                "input {input:?} split every {size} code points"
            );
        }
    }
}

#[test]
fn boundary_chunking_is_equivalent() {
    for input in CASES {
        let whole = run_whole(input);
        let plan = boundary_plan(input);
        assert_eq!(
            run_chunked(input, &plan),
            whole,
            "input {input:?} split at token boundaries"
        );
    }
}

#[test]
fn seeded_fuzz_chunking_is_equivalent() {
    for (case_index, &input) in CASES.iter().enumerate() {
        let whole = run_whole(input);
        let len = input.chars().count();
        for run in 0..FUZZ_RUNS {
            let seed = FUZZ_SEED ^ ((case_index as u64) << 32) ^ run as u64;
            let mut rng = Lcg::new(seed);
            let plan = fuzz_plan(&mut rng, len);
            assert_eq!(
                run_chunked(input, &plan),
                whole,
                "input {input:?} seed {seed:#x} plan {plan:?}"
            );
        }
    }
}
