pub trait StringExt {
    fn snake_case(&self) -> String;
}

impl StringExt for String {
    fn snake_case(&self) -> String {
        self.as_str().snake_case()
    }
}

impl StringExt for &str {
    fn snake_case(&self) -> String {
        let mut snake_case = String::with_capacity(self.len());
        let mut previous_was_separator = true;

        for c in self.chars() {
            if c.is_ascii_uppercase() {
                if !previous_was_separator {
                    snake_case.push('_');
                }
                snake_case.push(c.to_ascii_lowercase());
                previous_was_separator = false;
            } else if c.is_alphanumeric() {
                snake_case.push(c);
                previous_was_separator = false;
            } else if !previous_was_separator {
                snake_case.push('_');
                previous_was_separator = true;
            }
        }

        while snake_case.ends_with('_') {
            snake_case.pop();
        }

        snake_case
    }
}
