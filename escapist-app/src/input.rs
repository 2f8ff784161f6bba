use escapist_core::Complex;

use crate::error::ScriptError;

/// Fraction of the viewport to pan per arrow input.
pub(crate) const PAN_FRACTION: f64 = 0.1;
/// Zoom factor for `+`; `-` uses its inverse.
pub(crate) const ZOOM_IN_FACTOR: f64 = 0.8;

pub(crate) const USAGE: &str = "\
Usage: escapist [INPUT]...

Renders the view from preferences.json, applies each INPUT in order
(re-rendering after each one), and saves the final frame under images/.

Inputs:
  w / s                 raise / lower resolution by the quality step
  l / j                 raise / lower accuracy by the quality step
  left right up down    pan by 10% of the view
  + / -                 zoom in / out about the centre (`=` also zooms in)
  r                     reset the view
  back                  return to the previous view
  mandelbrot            switch to the Mandelbrot set
  julia:RE,IM           switch to the Julia set for RE + IM·i
  press:X,Y             pointer press at raster pixel (X, Y)
  release:X,Y           pointer release at raster pixel (X, Y)
  enter                 zoom into the pending press/release rectangle
  select:X0,Y0,X1,Y1    shorthand for press, release, enter
";

/// One discrete user action, in raster pixels where positions are involved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum InputEvent {
    IncreaseResolution,
    DecreaseResolution,
    IncreaseAccuracy,
    DecreaseAccuracy,
    /// Shift by a fraction of the view along each axis.
    Pan { fx: f64, fy: f64 },
    /// Scale the view about its centre; `factor < 1` zooms in.
    Zoom { factor: f64 },
    ResetView,
    Back,
    SetMandelbrot,
    SetJulia { c: Complex },
    PointerDown { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    ConfirmSelection,
}

impl InputEvent {
    /// Pointer movement only records the drag; everything else redraws.
    pub(crate) fn triggers_render(&self) -> bool {
        !matches!(self, Self::PointerDown { .. } | Self::PointerUp { .. })
    }
}

/// Parse one script token. `select:` expands to three events.
pub(crate) fn parse_token(token: &str) -> Result<Vec<InputEvent>, ScriptError> {
    let event = match token {
        "w" => InputEvent::IncreaseResolution,
        "s" => InputEvent::DecreaseResolution,
        "l" => InputEvent::IncreaseAccuracy,
        "j" => InputEvent::DecreaseAccuracy,
        "left" => InputEvent::Pan {
            fx: -PAN_FRACTION,
            fy: 0.0,
        },
        "right" => InputEvent::Pan {
            fx: PAN_FRACTION,
            fy: 0.0,
        },
        // Row 0 is the smallest imaginary part, so "up" lowers `start.im`.
        "up" => InputEvent::Pan {
            fx: 0.0,
            fy: -PAN_FRACTION,
        },
        "down" => InputEvent::Pan {
            fx: 0.0,
            fy: PAN_FRACTION,
        },
        "+" | "=" => InputEvent::Zoom {
            factor: ZOOM_IN_FACTOR,
        },
        "-" => InputEvent::Zoom {
            factor: 1.0 / ZOOM_IN_FACTOR,
        },
        "r" => InputEvent::ResetView,
        "back" => InputEvent::Back,
        "enter" => InputEvent::ConfirmSelection,
        "mandelbrot" => InputEvent::SetMandelbrot,
        _ => return parse_with_arguments(token),
    };
    Ok(vec![event])
}

fn parse_with_arguments(token: &str) -> Result<Vec<InputEvent>, ScriptError> {
    let (name, args) = token
        .split_once(':')
        .ok_or_else(|| ScriptError::UnknownToken(token.to_string()))?;

    match name {
        "julia" => {
            let [re, im] = numbers::<2>(token, args, "two numbers, e.g. julia:-0.7,0.27015")?;
            Ok(vec![InputEvent::SetJulia {
                c: Complex::new(re, im),
            }])
        }
        "press" => {
            let [x, y] = numbers::<2>(token, args, "pixel coordinates, e.g. press:120,80")?;
            Ok(vec![InputEvent::PointerDown { x, y }])
        }
        "release" => {
            let [x, y] = numbers::<2>(token, args, "pixel coordinates, e.g. release:240,80")?;
            Ok(vec![InputEvent::PointerUp { x, y }])
        }
        "select" => {
            let [x0, y0, x1, y1] =
                numbers::<4>(token, args, "four pixel coordinates, e.g. select:120,80,240,160")?;
            Ok(vec![
                InputEvent::PointerDown { x: x0, y: y0 },
                InputEvent::PointerUp { x: x1, y: y1 },
                InputEvent::ConfirmSelection,
            ])
        }
        _ => Err(ScriptError::UnknownToken(token.to_string())),
    }
}

/// Split `args` on commas into exactly `N` finite numbers.
fn numbers<const N: usize>(
    token: &str,
    args: &str,
    expected: &'static str,
) -> Result<[f64; N], ScriptError> {
    let bad = || ScriptError::BadArguments {
        token: token.to_string(),
        expected,
    };
    let parsed: Vec<f64> = args
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|_| bad()))
        .collect::<Result<_, _>>()?;
    if parsed.iter().any(|v| !v.is_finite()) {
        return Err(bad());
    }
    parsed.try_into().map_err(|_| bad())
}

/// Parse a full script, one token per argument.
pub(crate) fn parse_script<I, S>(tokens: I) -> Result<Vec<InputEvent>, ScriptError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut events = Vec::new();
    for token in tokens {
        events.extend(parse_token(token.as_ref())?);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_keys() {
        assert_eq!(parse_token("w").unwrap(), vec![InputEvent::IncreaseResolution]);
        assert_eq!(parse_token("s").unwrap(), vec![InputEvent::DecreaseResolution]);
        assert_eq!(parse_token("l").unwrap(), vec![InputEvent::IncreaseAccuracy]);
        assert_eq!(parse_token("j").unwrap(), vec![InputEvent::DecreaseAccuracy]);
    }

    #[test]
    fn julia_parameter() {
        assert_eq!(
            parse_token("julia:-0.7,0.27015").unwrap(),
            vec![InputEvent::SetJulia {
                c: Complex::new(-0.7, 0.27015)
            }]
        );
    }

    #[test]
    fn select_expands_to_drag_and_confirm() {
        let events = parse_token("select:10,20,110,90").unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerDown { x: 10.0, y: 20.0 },
                InputEvent::PointerUp { x: 110.0, y: 90.0 },
                InputEvent::ConfirmSelection,
            ]
        );
        assert!(!events[0].triggers_render());
        assert!(!events[1].triggers_render());
        assert!(events[2].triggers_render());
    }

    #[test]
    fn bad_arguments_rejected() {
        assert!(matches!(
            parse_token("julia:1"),
            Err(ScriptError::BadArguments { .. })
        ));
        assert!(matches!(
            parse_token("press:a,b"),
            Err(ScriptError::BadArguments { .. })
        ));
        assert!(matches!(
            parse_token("julia:NaN,0"),
            Err(ScriptError::BadArguments { .. })
        ));
        assert!(matches!(
            parse_token("select:1,2,3"),
            Err(ScriptError::BadArguments { .. })
        ));
    }

    #[test]
    fn unknown_tokens_rejected() {
        assert_eq!(
            parse_token("x"),
            Err(ScriptError::UnknownToken("x".into()))
        );
        assert_eq!(
            parse_token("spin:1,2"),
            Err(ScriptError::UnknownToken("spin:1,2".into()))
        );
    }

    #[test]
    fn script_preserves_order() {
        let events = parse_script(["w", "+", "back"]).unwrap();
        assert_eq!(parse_token("=").unwrap(), parse_token("+").unwrap());
        assert_eq!(
            events,
            vec![
                InputEvent::IncreaseResolution,
                InputEvent::Zoom {
                    factor: ZOOM_IN_FACTOR
                },
                InputEvent::Back,
            ]
        );
        assert!(parse_script(["w", "nope"]).is_err());
    }
}
