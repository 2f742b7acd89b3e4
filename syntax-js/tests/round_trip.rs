use serde_json::Value;
use syntax_js::generate;
use syntax_js::parse;

fn cycle(source: &str) -> String {
  generate(&parse(source).unwrap())
}

#[test]
fn round_trips_a_constructor_module() {
  let source = r#"
THREE.Color = function (hex) {
	this.setHex(hex);
};

THREE.Color.prototype = {
	constructor: THREE.Color,
	setHex: function (hex) {
		this.hex = Math.floor(hex);
		return this;
	}
};
"#;
  let out = cycle(source);
  // Generated output is stable under another parse and generate pass.
  assert_eq!(cycle(&out), out);
  assert!(out.contains("THREE.Color = function (hex) {"));
  assert!(out.contains("\tconstructor: THREE.Color,"));
}

#[test]
fn round_trips_control_flow() {
  let source = "for (var i = 0, l = a.length; i < l; i++) {\n\tif (a[i] === x) break;\n}\n";
  let out = cycle(source);
  assert_eq!(cycle(&out), out);
  assert!(out.starts_with("for (var i = 0, l = a.length; i < l; i++) {"));
}

#[test]
fn serializes_nodes_with_type_tags() {
  let top = parse("a.b = function () {};").unwrap();
  let value: Value = serde_json::from_str(&serde_json::to_string(&top).unwrap()).unwrap();
  let stmt = &value["body"][0];
  assert_eq!(stmt["$t"], "Expr");
  assert_eq!(stmt["expr"]["$t"], "Binary");
  assert_eq!(stmt["expr"]["left"]["$t"], "Member");
  assert_eq!(stmt["expr"]["left"]["member"], "b");
  assert_eq!(stmt["expr"]["right"]["$t"], "Func");
}

#[test]
fn preserves_string_and_number_values() {
  let out = cycle("a = '\\u0041';\nb = 0x10;\nc = .5;\n");
  assert!(out.contains("a = 'A';"));
  assert!(out.contains("b = 16;"));
  assert!(out.contains("c = 0.5;"));
}
