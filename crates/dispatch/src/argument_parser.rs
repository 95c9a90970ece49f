use crate::value::Value;

pub type ArgumentParseResult<'a> = Result<(Value, &'a str), ()>;

fn skip_whitespace(input: &str) -> &str {
    input.trim_start()
}

pub fn consume_token(input: &str) -> Option<(&str, &str)> {
    let input = skip_whitespace(input);
    if input.is_empty() {
        return None;
    }

    let end = input.find(char::is_whitespace).unwrap_or(input.len());

    Some((&input[..end], &input[end..]))
}

pub fn parse_string(input: &str) -> ArgumentParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(())?;
    Ok((Value::String(token.to_string()), rest))
}

pub fn parse_greedy_string(input: &str) -> ArgumentParseResult<'_> {
    let input = skip_whitespace(input);
    Ok((Value::GreedyString(input.to_string()), ""))
}

pub fn parse_integer(input: &str) -> ArgumentParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(())?;

    let value = token.parse::<i32>().map_err(|_| ())?;

    Ok((Value::Integer(value), rest))
}

pub fn parse_float(input: &str) -> ArgumentParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(())?;

    let value = token.parse::<f32>().map_err(|_| ())?;

    Ok((Value::Float(value), rest))
}

pub fn parse_boolean(input: &str) -> ArgumentParseResult<'_> {
    let (token, rest) = consume_token(input).ok_or(())?;

    let value = match token.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => true,
        "false" | "no" | "0" | "off" => false,
        _ => return Err(()),
    };

    Ok((Value::Boolean(value), rest))
}
