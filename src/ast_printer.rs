use crate::ast::{Expr, LiteralValue};

/// Converts an expression to a fully parenthesised prefix form, e.g.
/// `1 + 2 * 3` → `(+ 1.0 (* 2.0 3.0))`. Debugging aid only.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => match lit {
                LiteralValue::Bool(b) => b.to_string(),

                LiteralValue::Nil => "nil".into(),

                LiteralValue::Str(s) => s.clone(),

                LiteralValue::Number(n) => {
                    if n.fract() == 0.0 {
                        // 3 → 3.0
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }
            },

            Expr::Grouping(inner) => parenthesize("group", &[inner.as_ref()]),

            Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[right.as_ref()]),

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),

            Expr::Variable(name) => name.lexeme.clone(),

            Expr::Assign { name, value } => {
                format!("(= {} {})", name.lexeme, Self::print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut out = format!("(call {}", Self::print(callee));

                for argument in arguments {
                    out.push(' ');
                    out.push_str(&Self::print(argument));
                }

                out.push(')');
                out
            }
        }
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut out = format!("({}", name);

    for expr in exprs {
        out.push(' ');
        out.push_str(&AstPrinter::print(expr));
    }

    out.push(')');
    out
}
