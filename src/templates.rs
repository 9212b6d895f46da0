//! Starter sources written by `incmake new` and `incmake init`.

use crate::config::Lang;

/// Starter `main`, a helper translation unit and the header both include.
pub struct Template {
    pub main: String,
    pub header_name: String,
    pub header: String,
    pub helper: String,
}

pub fn get_template(name: &str, lang: Lang) -> Template {
    let ident = header_guard(name);
    let header_name = format!("{}.h", file_stem(name));
    let literal = c_string_body(name);

    let header = format!(
        r#"#ifndef {ident}_H
#define {ident}_H

const char *greeting(void);

#endif
"#
    );

    match lang {
        Lang::C => Template {
            main: format!(
                r#"#include <stdio.h>
#include "{header_name}"

int main(void) {{
    printf("%s\n", greeting());
    return 0;
}}
"#
            ),
            helper: format!(
                r#"#include "{header_name}"

const char *greeting(void) {{
    return "Hello from {literal}!";
}}
"#
            ),
            header_name,
            header,
        },
        Lang::Cpp => Template {
            main: format!(
                r#"#include <iostream>
#include "{header_name}"

int main() {{
    std::cout << greeting() << std::endl;
    return 0;
}}
"#
            ),
            helper: format!(
                r#"#include "{header_name}"

const char *greeting(void) {{
    return "Hello from {literal}!";
}}
"#
            ),
            header_name,
            header,
        },
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if stem.is_empty() { "app".to_string() } else { stem }
}

/// `text` escaped for use between the quotes of a C string literal.
fn c_string_body(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn header_guard(name: &str) -> String {
    file_stem(name).to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::extract_includes;

    #[test]
    fn test_c_template() {
        let t = get_template("myapp", Lang::C);
        assert!(t.main.contains("#include <stdio.h>"));
        assert!(t.main.contains("int main(void)"));
        assert_eq!(t.header_name, "myapp.h");
        assert!(t.header.contains("#ifndef MYAPP_H"));
        assert!(t.helper.contains("Hello from myapp!"));
    }

    #[test]
    fn test_cpp_template() {
        let t = get_template("game", Lang::Cpp);
        assert!(t.main.contains("#include <iostream>"));
        assert!(t.main.contains("std::cout"));
    }

    #[test]
    fn test_template_includes_only_project_header() {
        let t = get_template("my-app", Lang::Cpp);
        assert_eq!(t.header_name, "my_app.h");
        assert_eq!(extract_includes(&t.main), vec!["my_app.h"]);
        assert_eq!(extract_includes(&t.helper), vec!["my_app.h"]);
    }

    #[test]
    fn test_name_is_escaped_in_string_literal() {
        let t = get_template(r#"say "hi" \ bye"#, Lang::C);
        assert!(t.helper.contains(r#"return "Hello from say \"hi\" \\ bye!";"#));
        assert_eq!(t.header_name, "say__hi____bye.h");
    }

    #[test]
    fn test_c_string_body() {
        assert_eq!(c_string_body("plain"), "plain");
        assert_eq!(c_string_body("a\tb"), "a\\011b");
        assert_eq!(c_string_body("line\n"), "line\\n");
    }
}
