/// Expected outcome of running the artifact on one expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Exit status 0 and exactly this stdout (one trailing newline stripped).
    Success(&'static str),
    /// Non-zero exit status and exactly this diagnostic on the merged stream.
    Failure(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct TestCase {
    pub input: &'static str,
    pub expected: Expected,
}

const fn ok(input: &'static str, output: &'static str) -> TestCase {
    TestCase {
        input,
        expected: Expected::Success(output),
    }
}

const fn err(input: &'static str, diagnostic: &'static str) -> TestCase {
    TestCase {
        input,
        expected: Expected::Failure(diagnostic),
    }
}

/// The vbc case table. Success cases come before error cases and both keep
/// registration order, so reports stay diffable between runs.
pub const VBC_CASES: &[TestCase] = &[
    ok("1", "1"),
    ok("2+3", "5"),
    ok("3*4+5", "17"),
    ok("3+4*5", "23"),
    ok("(3+4)*5", "35"),
    ok("(((((2+2)*2+2)*2+2)*2+2)*2+2)*2", "188"),
    ok("1+2+3+4+5", "15"),
    ok("(1)", "1"),
    ok("(((((((3)))))))", "3"),
    ok("(1+2)*3", "9"),
    ok("2*4+9+3+2*1+5+1+6+6*1*1+8*0+0+5+0*4*9*5*8+9*7+5*1+3+1+4*5*7*3+0*3+4*8+8+8+4*0*5*3+5+4+5*7+9+6*6+7+9*2*6*9+2+1*3*7*1*1*5+1+2+7+4+3*4*2+0+4*4*2*2+6+7*5+9+0+8*4+6*7+5+4*4+2+5*5+1+6+3*5*9*9+7*4*3+7+4*9+3+0+1*8+1+2*9*4*5*1+0*1*9+5*3*5+9*6+5*4+5+5*8*6*4*9*2+0+0+1*5*3+6*8*0+0+2*3+7*5*6+8+6*6+9+3+7+0*0+5+2*8+2*7*2+3+9*1*4*8*7*9+2*0+1*6*4*2+8*8*3*1+8+2*4+8*3+8*3+9*5+2*3+9*5*6*4+3*6*6+7+4*8+0+2+9*8*0*6*8*1*2*7+0*5+6*5+0*2+7+2+3+8*7+6+1*3+5+4*5*4*6*1+4*7+9*0+4+9*8+7+5+6+2+6+1+1+1*6*0*9+7+6*2+4*4+1*6*2*9+3+0+0*1*8+4+6*2+6+2*7+7+0*9+6+2*1+6*5*2*3*5*2*6*4+2*9*2*4*5*2*2*3+8+8*3*2*3+0*5+9*6+8+3*1+6*9+8+9*2*0+2", "94305"),
    err("1+", "Unexpected end of input"),
    err("1+2)", "Unexpected token ')'"),
    err("((1+3)*12+(3*(2+6))", "Unexpected token '2'"),
];
