//! Treebank fixtures shared by the unit tests.

use crate::data::{GoldSentence, GoldToken, TaggedToken};
use crate::digraph::SentenceGraph;
use crate::types::{DependencyType, PosTag};

/// 10 words
pub const SIMPLE: &str = "1\tYet\tyet\tCONJ\tCC\t_\t5\tcc\t_\t_
2\twe\twe\tPRON\tPRP\tCase=Nom|Number=Plur|Person=1|PronType=Prs\t5\tnsubj\t_\t_
3\tdid\tdo\tAUX\tVBD\tMood=Ind|Tense=Past|VerbForm=Fin\t5\taux\t_\t_
4\tn't\tnot\tPART\tRB\t_\t5\tneg\t_\t_
5\tcharge\tcharge\tVERB\tVB\tVerbForm=Inf\t0\troot\t_\t_
6\tthem\tthey\tPRON\tPRP\tCase=Acc|Number=Plur|Person=3|PronType=Prs\t5\tdobj\t_\t_
7\tfor\tfor\tADP\tIN\t_\t9\tcase\t_\t_
8\tthe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t9\tdet\t_\t_
9\tevacuation\tevacuation\tNOUN\tNN\tNumber=Sing\t5\tnmod\t_\t_
10\t.\t.\tPUNCT\t.\t_\t5\tpunct\t_\t_
";

/// 19 words
pub const MED: &str = "1\tPresident\tPresident\tPROPN\tNNP\tNumber=Sing\t2\tcompound\t_\t_
2\tBush\tBush\tPROPN\tNNP\tNumber=Sing\t5\tnsubj\t_\t_
3\ton\ton\tADP\tIN\t_\t4\tcase\t_\t_
4\tTuesday\tTuesday\tPROPN\tNNP\tNumber=Sing\t5\tnmod\t_\t_
5\tnominated\tnominate\tVERB\tVBD\tMood=Ind|Tense=Past|VerbForm=Fin\t0\troot\t_\t_
6\ttwo\ttwo\tNUM\tCD\tNumType=Card\t7\tnummod\t_\t_
7\tindividuals\tindividual\tNOUN\tNNS\tNumber=Plur\t5\tdobj\t_\t_
8\tto\tto\tPART\tTO\t_\t9\tmark\t_\t_
9\treplace\treplace\tVERB\tVB\tVerbForm=Inf\t5\tadvcl\t_\t_
10\tretiring\tretire\tVERB\tVBG\tVerbForm=Ger\t11\tamod\t_\t_
11\tjurists\tjurist\tNOUN\tNNS\tNumber=Plur\t9\tdobj\t_\t_
12\ton\ton\tADP\tIN\t_\t14\tcase\t_\t_
13\tfederal\tfederal\tADJ\tJJ\tDegree=Pos\t14\tamod\t_\t_
14\tcourts\tcourt\tNOUN\tNNS\tNumber=Plur\t11\tnmod\t_\t_
15\tin\tin\tADP\tIN\t_\t18\tcase\t_\t_
16\tthe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t18\tdet\t_\t_
17\tWashington\tWashington\tPROPN\tNNP\tNumber=Sing\t18\tcompound\t_\t_
18\tarea\tarea\tNOUN\tNN\tNumber=Sing\t14\tnmod\t_\t_
19\t.\t.\tPUNCT\t.\t_\t5\tpunct\t_\t_
";

/// 20 words with two runs of proper nouns
pub const NNPS: &str = "1\tGuerrillas\tguerrilla\tNOUN\tNNS\tNumber=Plur\t2\tnsubj\t_\t_
2\tthreatened\tthreaten\tVERB\tVBD\tMood=Ind|Tense=Past|VerbForm=Fin\t0\troot\t_\t_
3\tto\tto\tPART\tTO\t_\t4\tmark\t_\t_
4\tassassinate\tassassinate\tVERB\tVB\tVerbForm=Inf\t2\txcomp\t_\t_
5\tPrime\tPrime\tPROPN\tNNP\tNumber=Sing\t6\tcompound\t_\t_
6\tMinister\tMinister\tPROPN\tNNP\tNumber=Sing\t8\tcompound\t_\t_
7\tIyad\tIyad\tPROPN\tNNP\tNumber=Sing\t8\tcompound\t_\t_
8\tAllawi\tAllawi\tPROPN\tNNP\tNumber=Sing\t4\tdobj\t_\t_
9\tand\tand\tCONJ\tCC\t_\t8\tcc\t_\t_
10\tMinister\tMinister\tPROPN\tNNP\tNumber=Sing\t14\tcompound\t_\t_
11\tof\tof\tADP\tIN\t_\t12\tcase\t_\t_
12\tDefense\tDefense\tPROPN\tNNP\tNumber=Sing\t10\tnmod\t_\t_
13\tHazem\tHazem\tPROPN\tNNP\tNumber=Sing\t14\tcompound\t_\t_
14\tShaalan\tShaalan\tPROPN\tNNP\tNumber=Sing\t8\tconj\t_\t_
15\tin\tin\tADP\tIN\t_\t16\tcase\t_\t_
16\tretaliation\tretaliation\tNOUN\tNN\tNumber=Sing\t4\tnmod\t_\t_
17\tfor\tfor\tADP\tIN\t_\t19\tcase\t_\t_
18\tthe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t19\tdet\t_\t_
19\tattack\tattack\tNOUN\tNN\tNumber=Sing\t16\tnmod\t_\t_
20\t.\t.\tPUNCT\t.\t_\t2\tpunct\t_\t_
";

/// 43 words
pub const LONG: &str = "1\tNow\tnow\tADV\tRB\t_\t5\tadvmod\t_\t_
2\t,\t,\tPUNCT\t,\t_\t5\tpunct\t_\t_
3\tI\tI\tPRON\tPRP\tCase=Nom|Number=Sing|Person=1|PronType=Prs\t5\tnsubj\t_\t_
4\twould\twould\tAUX\tMD\tVerbForm=Fin\t5\taux\t_\t_
5\targue\targue\tVERB\tVB\tVerbForm=Inf\t0\troot\t_\t_
6\tthat\tthat\tSCONJ\tIN\t_\t11\tmark\t_\t_
7\tone\tone\tPRON\tPRP\t_\t11\tnsubj\t_\t_
8\tcould\tcould\tAUX\tMD\tVerbForm=Fin\t11\taux\t_\t_
9\thave\thave\tAUX\tVB\tVerbForm=Inf\t11\taux\t_\t_
10\treasonably\treasonably\tADV\tRB\t_\t11\tadvmod\t_\t_
11\tpredicted\tpredict\tVERB\tVBN\tTense=Past|VerbForm=Part\t5\tccomp\t_\t_
12\tthat\tthat\tSCONJ\tIN\t_\t19\tmark\t_\t_
13\tsome\tsome\tDET\tDT\t_\t14\tdet\t_\t_
14\tform\tform\tNOUN\tNN\tNumber=Sing\t19\tnsubj\t_\t_
15\tof\tof\tADP\tIN\t_\t17\tcase\t_\t_
16\tmilitary\tmilitary\tADJ\tJJ\tDegree=Pos\t17\tamod\t_\t_
17\tviolence\tviolence\tNOUN\tNN\tNumber=Sing\t14\tnmod\t_\t_
18\twas\tbe\tVERB\tVBD\tMood=Ind|Number=Sing|Person=3|Tense=Past|VerbForm=Fin\t19\tcop\t_\t_
19\tlikely\tlikely\tADJ\tJJ\tDegree=Pos\t11\tccomp\t_\t_
20\tto\tto\tPART\tTO\t_\t21\tmark\t_\t_
21\toccur\toccur\tVERB\tVB\tVerbForm=Inf\t19\txcomp\t_\t_
22\tin\tin\tADP\tIN\t_\t23\tcase\t_\t_
23\tLebanon\tLebanon\tPROPN\tNNP\tNumber=Sing\t21\tnmod\t_\t_
24\t-LRB-\t-lrb-\tPUNCT\t-LRB-\t_\t25\tpunct\t_\t_
25\tconsidering\tconsider\tVERB\tVBG\tVerbForm=Ger\t19\tadvcl\t_\t_
26\tthat\tthat\tSCONJ\tIN\t_\t31\tmark\t_\t_
27\tthe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t28\tdet\t_\t_
28\tcountry\tcountry\tNOUN\tNN\tNumber=Sing\t31\tnsubj\t_\t_
29\thas\thave\tAUX\tVBZ\tMood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin\t31\taux\t_\t_
30\tbeen\tbe\tAUX\tVBN\tTense=Past|VerbForm=Part\t31\taux\t_\t_
31\texperiencing\texperience\tVERB\tVBG\tTense=Pres|VerbForm=Part\t25\tccomp\t_\t_
32\tsome\tsome\tDET\tDT\t_\t33\tdet\t_\t_
33\tform\tform\tNOUN\tNN\tNumber=Sing\t31\tdobj\t_\t_
34\tof\tof\tADP\tIN\t_\t35\tcase\t_\t_
35\tconflict\tconflict\tNOUN\tNN\tNumber=Sing\t33\tnmod\t_\t_
36\tfor\tfor\tADP\tIN\t_\t41\tcase\t_\t_
37\tapproximately\tapproximately\tADV\tRB\t_\t41\tadvmod\t_\t_
38\tthe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t41\tdet\t_\t_
39\tlast\tlast\tADJ\tJJ\tDegree=Pos\t41\tamod\t_\t_
40\t32\t32\tNUM\tCD\tNumType=Card\t41\tnummod\t_\t_
41\tyears\tyear\tNOUN\tNNS\tNumber=Plur\t31\tnmod\t_\t_
42\t-RRB-\t-rrb-\tPUNCT\t-RRB-\t_\t25\tpunct\t_\t_
43\t.\t.\tPUNCT\t.\t_\t5\tpunct\t_\t_
";

/// Read one sentence of CoNLL-U: id, form, lemma, upos, xpos, feats, head, deprel
pub fn gold(conllu: &str) -> GoldSentence {
    conllu
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| {
            let cols: Vec<&str> = line.split('\t').collect();
            assert!(cols.len() >= 8, "short CoNLL-U row: {:?}", line);
            GoldToken {
                word: cols[1].to_string(),
                tag: cols[3].parse().unwrap(),
                head: cols[6].parse().unwrap(),
                label: cols[7].parse().unwrap(),
            }
        })
        .collect()
}

pub fn graph(conllu: &str) -> SentenceGraph {
    gold(conllu).to_graph().unwrap()
}

/// `n` nouns named w1..wn
pub fn tagged(n: usize) -> Vec<TaggedToken> {
    (1..=n).map(|i| TaggedToken::new(format!("w{}", i), PosTag::Noun)).collect()
}

/// Nouns attached by the given 1-based heads; arcs to ROOT are labelled root
pub fn gold_from_heads(heads: &[usize]) -> GoldSentence {
    heads
        .iter()
        .enumerate()
        .map(|(i, &head)| GoldToken {
            word: format!("w{}", i + 1),
            tag: PosTag::Noun,
            head,
            label: if head == 0 { DependencyType::Root } else { DependencyType::Dep },
        })
        .collect()
}

pub fn graph_from_heads(heads: &[usize]) -> SentenceGraph {
    gold_from_heads(heads).to_graph().unwrap()
}

pub fn build(rows: &[(&str, PosTag, usize, DependencyType)]) -> SentenceGraph {
    rows.iter()
        .map(|&(word, tag, head, label)| GoldToken { word: word.to_string(), tag, head, label })
        .collect::<GoldSentence>()
        .to_graph()
        .unwrap()
}

#[test]
fn fixtures_load() {
    assert_eq!(gold(SIMPLE).len(), 10);
    assert_eq!(gold(MED).len(), 19);
    assert_eq!(gold(NNPS).len(), 20);
    assert_eq!(gold(LONG).len(), 43);
    assert!(graph(LONG).is_projective());
}
