use proc_macro2::{Span, TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::spanned::Spanned;
use syn::visit_mut::{self, VisitMut};
use syn::{parse_macro_input, parse_quote, Expr, ExprMethodCall, Ident, Item, ItemFn, ReturnType};

/// Turns a function returning `Outcome<T, E>` into a scoped block.
///
/// The scope is bound to `raise`, or to the name given as argument:
///
/// ```rust,ignore
/// #[scoped(scope)]
/// fn port(input: &str) -> Outcome<u16, String> {
///     let port = scope.bind(parse(input));
///     scope.ensure(port != 0, || "port 0 is reserved".to_string());
///     port
/// }
/// ```
///
/// The body evaluates to the success value, so `return value` inside it returns
/// `Success(value)` and `?` is not available.
///
/// Calls made directly on the scope (`bind`, `raise`, `raise_failure`, `raise_if_failure`,
/// `ensure`, `ensure_some` and the suffix `outcome.bind(scope)`) expand into early returns,
/// nothing unwinds. When the scope is used any other way, captured by a closure or passed
/// to a macro for example, the whole body runs inside `outcome::run_scoped` instead.
#[proc_macro_attribute]
pub fn scoped(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    // Parse the input tokens into a syntax tree
    let function = parse_macro_input!(item as ItemFn);

    let binding = if attr.is_empty() {
        Ident::new("raise", Span::call_site())
    } else {
        parse_macro_input!(attr as Ident)
    };

    expand(binding, function)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn expand(binding: Ident, function: ItemFn) -> syn::Result<TokenStream> {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = function;

    if let Some(asyncness) = sig.asyncness {
        return Err(syn::Error::new(
            asyncness.span(),
            "`#[scoped]` can not be used on async functions",
        ));
    }

    if let ReturnType::Default = sig.output {
        return Err(syn::Error::new(
            sig.ident.span(),
            "`#[scoped]` functions must return an `Outcome`",
        ));
    }

    let mut rewrite = EarlyReturns {
        binding: &binding,
        escaped: false,
    };
    let mut rewritten = (*block).clone();
    rewrite.visit_block_mut(&mut rewritten);

    if rewrite.escaped {
        let statements = &block.stmts;

        // The closure's signature comes from `run_scoped`, `T` and `E` from the function's return type.
        return Ok(quote! {
            #(#attrs)*
            #vis #sig {
                ::outcome::run_scoped(|#[allow(unused_variables)] #binding| {
                    #(#statements)*
                })
            }
        });
    }

    let statements = &rewritten.stmts;

    Ok(quote! {
        #(#attrs)*
        #vis #sig {
            let __outcome_value = { #(#statements)* };
            #[allow(unreachable_code)]
            return ::outcome::Outcome::Success(__outcome_value);
        }
    })
}

/// Rewrites calls on the scope binding into `return Failure(..)` and plain `return v`
/// into `return Success(v)`.
///
/// Closures, async blocks, nested items and macros are left alone. If any of them mention
/// the binding, or the binding is used as a value, `escaped` is set.
struct EarlyReturns<'a> {
    binding: &'a Ident,
    escaped: bool,
}

impl EarlyReturns<'_> {
    fn is_binding(&self, expr: &Expr) -> bool {
        match expr {
            Expr::Path(path) => path.qself.is_none() && path.path.is_ident(self.binding),
            _ => false,
        }
    }

    fn mentions_binding(&self, tokens: TokenStream) -> bool {
        tokens.into_iter().any(|tree| match tree {
            TokenTree::Ident(ident) => ident == *self.binding,
            TokenTree::Group(group) => self.mentions_binding(group.stream()),
            _ => false,
        })
    }

    fn check_opaque<T: ToTokens>(&mut self, node: &T) {
        if self.mentions_binding(node.to_token_stream()) {
            self.escaped = true;
        }
    }

    fn rewrite_call(&mut self, call: &ExprMethodCall) -> Option<Expr> {
        if call.turbofish.is_some() {
            return None;
        }

        let mut args: Vec<Expr> = call.args.iter().cloned().collect();

        if !self.is_binding(&call.receiver) {
            // outcome.bind(raise)
            if call.method == "bind" && args.len() == 1 && self.is_binding(&args[0]) {
                let mut outcome = (*call.receiver).clone();
                self.visit_expr_mut(&mut outcome);
                return Some(parenthesized(bind(&outcome)));
            }
            return None;
        }

        let method = call.method.to_string();
        let arity = match method.as_str() {
            "bind" | "raise" | "raise_failure" | "raise_if_failure" => 1,
            "ensure" | "ensure_some" => 2,
            _ => return None,
        };
        if args.len() != arity {
            return None;
        }

        for arg in &mut args {
            self.visit_expr_mut(arg);
        }

        let rewritten: Expr = match (method.as_str(), args.as_slice()) {
            ("bind", [outcome]) => bind(outcome),
            ("raise", [cause]) => parse_quote! {
                return ::outcome::Outcome::Failure(#cause)
            },
            ("raise_failure", [failure]) => parse_quote! {
                return ::outcome::Outcome::Failure(match #failure {
                    ::outcome::Outcome::Success(never) => match never {},
                    ::outcome::Outcome::Failure(cause) => cause,
                })
            },
            ("raise_if_failure", [outcome]) => parse_quote! {
                if let ::outcome::Outcome::Failure(cause) = #outcome {
                    return ::outcome::Outcome::Failure(cause);
                }
            },
            ("ensure", [condition, cause]) => parse_quote! {
                if !(#condition) {
                    return ::outcome::Outcome::Failure((#cause)());
                }
            },
            ("ensure_some", [value, cause]) => parse_quote! {
                match #value {
                    ::core::option::Option::Some(value) => value,
                    ::core::option::Option::None => {
                        return ::outcome::Outcome::Failure((#cause)());
                    }
                }
            },
            _ => return None,
        };

        Some(parenthesized(rewritten))
    }
}

impl VisitMut for EarlyReturns<'_> {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        if let Expr::MethodCall(call) = &*expr {
            if let Some(rewritten) = self.rewrite_call(call) {
                *expr = rewritten;
                return;
            }
        }

        if self.is_binding(expr) {
            self.escaped = true;
            return;
        }

        if let Expr::Closure(_) | Expr::Async(_) | Expr::Macro(_) = expr {
            self.check_opaque(&*expr);
            return;
        }

        match expr {
            Expr::Return(ret) => {
                visit_mut::visit_expr_return_mut(self, ret);
                let value = match ret.expr.take() {
                    Some(value) => *value,
                    None => parse_quote!(()),
                };
                ret.expr = Some(Box::new(parse_quote! {
                    ::outcome::Outcome::Success(#value)
                }));
            }
            _ => visit_mut::visit_expr_mut(self, expr),
        }
    }

    fn visit_item_mut(&mut self, item: &mut Item) {
        self.check_opaque(&*item);
    }
}

fn bind(outcome: &Expr) -> Expr {
    parse_quote! {
        match #outcome {
            ::outcome::Outcome::Success(value) => value,
            ::outcome::Outcome::Failure(cause) => {
                return ::outcome::Outcome::Failure(cause);
            }
        }
    }
}

fn parenthesized(expr: Expr) -> Expr {
    parse_quote!((#expr))
}
