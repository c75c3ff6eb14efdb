//! Error catalog for the calculator module

use calc_errors::ErrDef;

pub const INVALID_OPERAND: ErrDef = ErrDef {
    status: 400,
    title: "Invalid Operand",
    code: "CALCULATOR_INVALID_OPERAND",
    type_url: "https://errors.bigcalc.dev/CALCULATOR_INVALID_OPERAND",
};

pub const DIVISION_BY_ZERO: ErrDef = ErrDef {
    status: 422,
    title: "Division By Zero",
    code: "CALCULATOR_DIVISION_BY_ZERO",
    type_url: "https://errors.bigcalc.dev/CALCULATOR_DIVISION_BY_ZERO",
};
