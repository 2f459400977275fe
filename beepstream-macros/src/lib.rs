use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Creates a `MorseScript` at compile time from a string literal.
///
/// The literal is parsed with the default notation, so malformed Morse is a
/// compile error rather than a runtime `UnknownSignal`.
///
/// # Format
///
/// - `.` is a dot and `-` a dash
/// - letters are separated by spaces
/// - words are separated by `/`
///
/// Surrounding whitespace and repeated delimiters are ignored.
///
/// # Examples
///
/// ```ignore
/// use beepstream::morse;
///
/// let sos = morse!("... --- ...");
/// let hello_world = morse!(".... . .-.. .-.. --- / .-- --- .-. .-.. -..");
/// ```
#[proc_macro]
pub fn morse(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as LitStr);
    let text = input.value();

    // Parse the notation at compile time
    match parse_script(&text) {
        Ok(words) => {
            let words = words.iter().map(|word| {
                let letters = word.iter().map(|letter| {
                    let symbols = letter.iter().map(Symbol::tokens);
                    quote! { &[#(#symbols),*] }
                });
                quote! { &[#(#letters),*] }
            });

            let expanded = quote! {
                {
                    beepstream::morse::MorseScript::from_symbols(&[#(#words),*])
                }
            };

            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid morse string '{}': {}", text, e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    fn tokens(&self) -> TokenStream2 {
        match self {
            Symbol::Dot => quote! { beepstream::morse::Symbol::Dot },
            Symbol::Dash => quote! { beepstream::morse::Symbol::Dash },
        }
    }
}

fn parse_symbol(sign: char) -> Result<Symbol, String> {
    match sign {
        '.' => Ok(Symbol::Dot),
        '-' => Ok(Symbol::Dash),
        _ => Err(format!("unknown signal '{}'", sign)),
    }
}

fn parse_script(s: &str) -> Result<Vec<Vec<Vec<Symbol>>>, String> {
    let mut words = Vec::new();
    for word in s.split('/').map(str::trim).filter(|w| !w.is_empty()) {
        let letters = word
            .split(' ')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|letter| letter.chars().map(parse_symbol).collect())
            .collect::<Result<Vec<Vec<Symbol>>, String>>()?;
        words.push(letters);
    }

    if words.is_empty() {
        return Err("no signals".to_string());
    }
    Ok(words)
}
