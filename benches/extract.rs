use divan::{Bencher, black_box};
use std::sync::Arc;
use translationese::config::ExtractConfig;
use translationese::conllu::{SegmentPolicy, segment};
use translationese::lang::Lang;
use translationese::lists::SupportLists;
use translationese::pipeline::{Document, Extractor};

fn main() {
    divan::main();
}

const SENTENCE: &str = "1\tThe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t2\tdet\t_\t_
2\treport\treport\tNOUN\tNN\tNumber=Sing\t5\tnsubj:pass\t_\t_
3\thas\thave\tAUX\tVBZ\tMood=Ind|Tense=Pres|VerbForm=Fin\t5\taux\t_\t_
4\tbeen\tbe\tAUX\tVBN\tTense=Past|VerbForm=Part\t5\taux:pass\t_\t_
5\twritten\twrite\tVERB\tVBN\tTense=Past|VerbForm=Part|Voice=Pass\t0\troot\t_\t_
6\tby\tby\tADP\tIN\t_\t8\tcase\t_\t_
7\tthe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t8\tdet\t_\t_
8\tcommittee\tcommittee\tNOUN\tNN\tNumber=Sing\t5\tobl\t_\t_
9\twhich\twhich\tPRON\tWDT\tPronType=Rel\t11\tnsubj\t_\t_
10\tnever\tnever\tADV\tRB\tPolarity=Neg\t11\tadvmod\t_\t_
11\tmet\tmeet\tVERB\tVBD\tMood=Ind|Tense=Past|VerbForm=Fin\t8\tacl:relcl\t_\t_
12\t.\t.\tPUNCT\t.\t_\t5\tpunct\t_\t_

";

fn corpus(sentences: usize) -> String {
    SENTENCE.repeat(sentences)
}

#[divan::bench(args = [100, 1000])]
fn segment_sentences(bencher: Bencher, sentences: usize) {
    let text = corpus(sentences);
    bencher.bench_local(|| {
        let (trees, _) = segment(black_box(&text), SegmentPolicy::default()).unwrap();
        black_box(trees)
    });
}

#[divan::bench(args = [100, 1000])]
fn extract_document(bencher: Bencher, sentences: usize) {
    let config = ExtractConfig::default();
    let document =
        Document::from_conllu("bench", Lang::En, &corpus(sentences), config.segment_policy())
            .unwrap();
    let extractor = Extractor::new(&config, Arc::new(SupportLists::new()));
    bencher.bench_local(|| black_box(extractor.extract(black_box(&document))));
}
