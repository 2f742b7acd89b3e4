use modularize_js::Conversion;
use modularize_js::Corpus;
use modularize_js::CorpusOptions;
use modularize_js::WarningKind;

fn convert(files: &[(&str, &str)]) -> Conversion {
  convert_with(CorpusOptions::default(), files, &[])
}

fn convert_with(
  options: CorpusOptions,
  files: &[(&str, &str)],
  chunks: &[(&str, &str)],
) -> Conversion {
  let mut corpus = Corpus::new(options);
  for (path, source) in files {
    corpus.add_script(path, source).unwrap();
  }
  for (name, text) in chunks {
    corpus.add_chunk(name, text);
  }
  corpus.convert().unwrap()
}

fn module<'a>(conversion: &'a Conversion, path: &str) -> &'a str {
  &conversion
    .modules
    .iter()
    .find(|m| m.path == path)
    .unwrap_or_else(|| panic!("no module {}", path))
    .source
}

#[test]
fn rewrites_an_acyclic_pair_with_direct_imports() {
  let conversion = convert(&[
    ("Foo.js", "THREE.Foo = function () {};"),
    ("Bar.js", "THREE.Bar = function () { return new THREE.Foo(); };"),
  ]);

  assert_eq!(
    module(&conversion, "./Foo.js"),
    "var Foo;\nFoo = function () {\n};\nFoo.prototype.isFoo = true;\nexports.Foo = Foo;\n"
  );
  assert_eq!(
    module(&conversion, "./Bar.js"),
    "var FooModule = require('./Foo');\nvar Bar;\nBar = function () {\n\treturn new FooModule.Foo();\n};\nBar.prototype.isBar = true;\nexports.Bar = Bar;\n"
  );
  assert_eq!(
    conversion.index,
    "exports.Foo = require('./Foo').Foo;\nexports.Bar = require('./Bar').Bar;\n"
  );
  assert!(conversion.warnings.is_empty());
}

#[test]
fn no_namespace_references_survive_in_any_output() {
  let conversion = convert(&[
    ("math/Color.js", "THREE.Color = function () { this.v = THREE.clamp(0); };"),
    ("math/Math.js", "THREE.clamp = function (x) { return x; };"),
  ]);
  for m in &conversion.modules {
    assert!(!m.source.contains("THREE"), "{} still mentions THREE", m.path);
  }
}

#[test]
fn two_file_cycle_uses_deferred_accessors_on_both_edges() {
  let conversion = convert(&[
    ("A.js", "THREE.A = function () { this.b = new THREE.B(); };"),
    ("B.js", "THREE.B = function () { this.a = new THREE.A(); };"),
  ]);

  let a = module(&conversion, "./A.js");
  assert!(a.contains("var BModule, getBModule = function () {"));
  assert!(a.contains("return BModule = require('./B');"));
  assert!(a.contains("new (BModule || getBModule()).B()"));

  let b = module(&conversion, "./B.js");
  assert!(b.contains("var AModule, getAModule = function () {"));
  assert!(b.contains("new (AModule || getAModule()).A()"));
}

#[test]
fn three_file_cycle_uses_deferred_accessors_on_all_edges() {
  let conversion = convert(&[
    ("A.js", "THREE.A = function () { return THREE.B; };"),
    ("B.js", "THREE.B = function () { return THREE.C; };"),
    ("C.js", "THREE.C = function () { return THREE.A; };"),
  ]);
  assert!(module(&conversion, "./A.js").contains("var BModule, getBModule"));
  assert!(module(&conversion, "./B.js").contains("var CModule, getCModule"));
  assert!(module(&conversion, "./C.js").contains("var AModule, getAModule"));
}

#[test]
fn generated_locals_avoid_adversarial_names() {
  let conversion = convert(&[
    ("Foo.js", "THREE.Foo = function () {};"),
    (
      "Check.js",
      "var instance = 1, toString = 2, _instance = 3;\nTHREE.check = function (v) { return v instanceof THREE.Foo; };",
    ),
  ]);

  let check = module(&conversion, "./Check.js");
  assert!(check.contains("var __instance;"));
  assert!(check.contains("!!(__instance = v) && !!__instance.isFoo"));
  // The pre-existing declarations are untouched.
  assert!(check.contains("var instance = 1, toString = 2, _instance = 3;"));
}

#[test]
fn function_provides_get_prototype_tags_and_importers_use_the_local() {
  let conversion = convert(&[
    ("F1.js", "THREE.Foo = function () {};"),
    ("F2.js", "THREE.Bar = function () { return new THREE.Foo(); };"),
  ]);
  assert!(module(&conversion, "./F1.js").contains("Foo.prototype.isFoo = true;"));
  let f2 = module(&conversion, "./F2.js");
  assert!(f2.contains("var FooModule = require('./F1');"));
  assert!(f2.contains("new FooModule.Foo()"));
}

#[test]
fn ambiguous_provides_get_guarded_prototype_tags() {
  let conversion = convert(&[(
    "Maybe.js",
    "THREE.Maybe = make();\nfunction make() { return function () {}; }",
  )]);
  let maybe = module(&conversion, "./Maybe.js");
  assert!(maybe.contains("exports.Maybe = make();"));
  assert!(maybe.contains(
    "if (typeof exports.Maybe === 'function') exports.Maybe.prototype.isMaybe = true;"
  ));
}

#[test]
fn redefinition_keeps_the_last_owner_and_warns_once() {
  let conversion = convert(&[
    ("S1.js", "THREE.Shared = function () {};"),
    ("S2.js", "THREE.Shared = function () {};"),
    ("Use.js", "THREE.Use = function () { return new THREE.Shared(); };"),
  ]);

  let redefinitions: Vec<_> = conversion
    .warnings
    .iter()
    .filter(|w| matches!(&w.kind, WarningKind::Redefinition { .. }))
    .collect();
  assert_eq!(redefinitions.len(), 1);
  assert_eq!(redefinitions[0].path, "./S2.js");
  assert_eq!(redefinitions[0].kind, WarningKind::Redefinition {
    name: "Shared".to_string(),
    previous: "./S1.js".to_string(),
  });

  // The user of the shared name imports the last analyzed provider.
  assert!(module(&conversion, "./Use.js").contains("var SharedModule = require('./S2');"));
}

#[test]
fn missing_definition_drops_only_the_dependent_file() {
  let conversion = convert(&[
    ("M.js", "THREE.M = function () { return THREE.Missing; };"),
    ("Ok.js", "THREE.Ok = function () {};"),
  ]);

  assert!(conversion.modules.iter().all(|m| m.path != "./M.js"));
  assert_eq!(
    module(&conversion, "./Ok.js"),
    "var Ok;\nOk = function () {\n};\nOk.prototype.isOk = true;\nexports.Ok = Ok;\n"
  );
  assert_eq!(conversion.warnings, vec![modularize_js::Warning {
    path: "./M.js".to_string(),
    kind: WarningKind::MissingDefinition {
      name: "Missing".to_string(),
    },
  }]);
}

#[test]
fn dropping_a_file_cascades_to_its_dependents() {
  let conversion = convert(&[
    ("A.js", "THREE.A = function () { return THREE.Missing; };"),
    ("B.js", "THREE.B = function () { return new THREE.A(); };"),
    ("C.js", "THREE.C = function () {};"),
  ]);

  let paths: Vec<_> = conversion.modules.iter().map(|m| m.path.as_str()).collect();
  assert_eq!(paths, vec!["./C.js"]);
  let dropped: Vec<_> = conversion
    .warnings
    .iter()
    .filter(|w| matches!(&w.kind, WarningKind::MissingDefinition { .. }))
    .map(|w| w.path.as_str())
    .collect();
  assert_eq!(dropped, vec!["./A.js", "./B.js"]);
}

#[test]
fn computed_and_residual_accesses_exclude_the_file() {
  let conversion = convert(&[
    ("CompAssign.js", "THREE[key] = 1;\nvar key = 'x';"),
    ("CompRead.js", "var a = THREE[key];\nvar key = 'x';"),
    ("Residual.js", "var t = THREE;"),
    ("Ok.js", "THREE.Ok = function () {};"),
  ]);

  let paths: Vec<_> = conversion.modules.iter().map(|m| m.path.as_str()).collect();
  assert_eq!(paths, vec!["./Ok.js"]);
  let kinds: Vec<_> = conversion.warnings.iter().map(|w| &w.kind).collect();
  assert!(matches!(kinds[0], WarningKind::ComputedAssignment));
  assert!(matches!(kinds[1], WarningKind::ComputedAccess));
  assert!(matches!(
    kinds[2],
    WarningKind::ResidualNamespaceReference { .. }
  ));
  assert_eq!(
    conversion.warnings[2].to_string(),
    "ignored ./Residual.js (THREE is still referenced)"
  );
}

#[test]
fn native_instanceof_becomes_a_tag_comparison() {
  let conversion = convert(&[(
    "Arr.js",
    "THREE.isArr = function (x) { return x instanceof Array; };",
  )]);
  let arr = module(&conversion, "./Arr.js");
  assert!(arr.contains("var toString = Object.prototype.toString;"));
  assert!(arr.contains("toString.call(x).slice(8, -1) === 'Array'"));
}

#[test]
fn shader_chunks_merge_into_the_designated_table() {
  let conversion = convert_with(
    CorpusOptions {
      namespace: "THREE".to_string(),
      chunk_table: Some("./shaders/ShaderChunk.js".to_string()),
    },
    &[("shaders/ShaderChunk.js", "THREE.ShaderChunk = {};")],
    &[("common", "float x;"), ("fog", "vec3 fogColor;")],
  );

  let table = module(&conversion, "./shaders/ShaderChunk.js");
  assert!(table.contains("'common': 'float x;',"));
  assert!(table.contains("'fog': 'vec3 fogColor;'"));
  assert!(table.contains("exports.ShaderChunk = ShaderChunk;"));
}

#[test]
fn chunk_table_with_wrong_shape_is_fatal() {
  let mut corpus = Corpus::new(CorpusOptions {
    namespace: "THREE".to_string(),
    chunk_table: Some("./ShaderChunk.js".to_string()),
  });
  corpus
    .add_script("ShaderChunk.js", "var notATable = 1;")
    .unwrap();
  corpus.add_chunk("common", "float x;");
  assert!(corpus.convert().is_err());
}

#[test]
fn graph_counts_dependents_and_lists_edges() {
  let conversion = convert(&[
    ("Foo.js", "THREE.Foo = function () {};"),
    ("math/Bar.js", "THREE.Bar = function () { return new THREE.Foo(); };"),
  ]);

  let graph = &conversion.graph;
  assert_eq!(graph.nodes.len(), 2);
  assert_eq!(graph.nodes[0].label, "Foo");
  assert_eq!(graph.nodes[0].group, "");
  assert_eq!(graph.nodes[0].value, 1);
  assert_eq!(graph.nodes[1].label, "Bar");
  assert_eq!(graph.nodes[1].group, "math");
  assert_eq!(graph.nodes[1].value, 0);
  assert_eq!(graph.edges.len(), 1);
  assert_eq!(graph.edges[0].from, graph.nodes[1].id);
  assert_eq!(graph.edges[0].to, graph.nodes[0].id);

  let json = graph.to_json();
  assert!(json.contains("\"label\": \"Foo\""));
}

#[test]
fn multi_provide_files_forward_through_a_self_import() {
  let conversion = convert(&[(
    "MathUtils.js",
    "THREE.MathUtils = {};\nTHREE.clamp = function (x) { return x; };",
  )]);

  assert_eq!(
    conversion.index,
    "var MathUtils = require('./MathUtils');\nexports.MathUtils = MathUtils.MathUtils;\nexports.clamp = MathUtils.clamp;\n"
  );
}

#[test]
fn literal_provides_export_in_place_without_a_local() {
  let conversion = convert(&[("Rev.js", "THREE.REVISION = '71';")]);
  assert_eq!(
    module(&conversion, "./Rev.js"),
    "exports.REVISION = '71';\n"
  );
  assert_eq!(conversion.index, "exports.REVISION = require('./Rev').REVISION;\n");
}

#[test]
fn self_references_resolve_to_the_provide_local() {
  let conversion = convert(&[(
    "Vec.js",
    "THREE.Vec = function () {};\nTHREE.Vec.prototype.clone = function () { return new THREE.Vec(); };",
  )]);
  let vec = module(&conversion, "./Vec.js");
  assert!(vec.contains("Vec.prototype.clone = function () {"));
  assert!(vec.contains("return new Vec();"));
  assert!(!vec.contains("THREE"));
}

#[test]
fn namespace_root_is_configurable() {
  let conversion = convert_with(
    CorpusOptions {
      namespace: "NS".to_string(),
      chunk_table: None,
    },
    &[
      ("Foo.js", "NS.Foo = function () {};"),
      ("Bar.js", "NS.Bar = function () { return new NS.Foo(); };"),
    ],
    &[],
  );
  assert!(module(&conversion, "./Bar.js").contains("var FooModule = require('./Foo');"));
}

#[test]
fn parse_failure_is_fatal() {
  let mut corpus = Corpus::new(CorpusOptions::default());
  let err = corpus.add_script("Broken.js", "THREE.Foo = function ( {;").unwrap_err();
  assert!(err.to_string().contains("./Broken.js"));
}
